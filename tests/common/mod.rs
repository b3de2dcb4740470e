//! Shared test fixtures: in-memory repositories honoring the same guard
//! semantics as the PostgreSQL implementations, plus state builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use movie_rental::application::services::{IdentityService, MovieService, RentalService};
use movie_rental::domain::entities::{
    Client, ClientPatch, Movie, MovieFilter, MoviePatch, NewClient, NewMovie, NewRental,
    Rental, RentalDetails, RentalStatus, Role, MAX_ACTIVE_RENTALS,
};
use movie_rental::domain::identity::{AuthUser, IdentityResolver};
use movie_rental::domain::repositories::{
    ClientRepository, MovieRepository, RentalRepository,
};
use movie_rental::error::AppError;
use movie_rental::infrastructure::cache::MemoryCache;
use movie_rental::state::{CatalogState, IdentityState};
use movie_rental::utils::{HashScheme, PasswordHasher, TokenCodec};

pub struct FakeClientRepository {
    clients: Mutex<Vec<Client>>,
    next_id: AtomicI64,
}

impl FakeClientRepository {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn get(&self, id: i64) -> Option<Client> {
        self.clients.lock().unwrap().iter().find(|c| c.id == id).cloned()
    }

    fn adjust_counter(&self, id: i64, delta: i32) {
        let mut clients = self.clients.lock().unwrap();
        if let Some(client) = clients.iter_mut().find(|c| c.id == id) {
            client.active_rentals_count = (client.active_rentals_count + delta).max(0);
        }
    }
}

#[async_trait]
impl ClientRepository for FakeClientRepository {
    async fn create(&self, new_client: NewClient) -> Result<Client, AppError> {
        let mut clients = self.clients.lock().unwrap();
        if clients.iter().any(|c| c.email == new_client.email) {
            return Err(AppError::conflict("Email already registered", json!({})));
        }
        let client = Client {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            first_name: new_client.first_name,
            last_name: new_client.last_name,
            email: new_client.email,
            password_hash: new_client.password_hash,
            address: new_client.address,
            phone: new_client.phone,
            role: new_client.role,
            registration_date: Utc::now(),
            active_rentals_count: 0,
        };
        clients.push(client.clone());
        Ok(client)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, AppError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, AppError> {
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Client>, AppError> {
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|c| {
                c.first_name.eq_ignore_ascii_case(first_name)
                    && c.last_name.eq_ignore_ascii_case(last_name)
            })
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Client>, AppError> {
        Ok(self.clients.lock().unwrap().clone())
    }

    async fn update(&self, id: i64, patch: ClientPatch) -> Result<Client, AppError> {
        let mut clients = self.clients.lock().unwrap();
        let client = clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found("Client not found", json!({ "id": id })))?;
        if let Some(v) = patch.first_name {
            client.first_name = v;
        }
        if let Some(v) = patch.last_name {
            client.last_name = v;
        }
        if let Some(v) = patch.phone {
            client.phone = v;
        }
        if let Some(v) = patch.address {
            client.address = v;
        }
        if let Some(v) = patch.password_hash {
            client.password_hash = v;
        }
        if let Some(v) = patch.role {
            client.role = v;
        }
        Ok(client.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut clients = self.clients.lock().unwrap();
        let before = clients.len();
        clients.retain(|c| c.id != id);
        Ok(clients.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct FakeMovieRepository {
    movies: Mutex<Vec<Movie>>,
    next_id: AtomicI64,
}

impl FakeMovieRepository {
    pub fn new() -> Self {
        Self {
            movies: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn get(&self, id: i64) -> Option<Movie> {
        self.movies.lock().unwrap().iter().find(|m| m.id == id).cloned()
    }

    fn set_available(&self, id: i64, available: bool) {
        let mut movies = self.movies.lock().unwrap();
        if let Some(movie) = movies.iter_mut().find(|m| m.id == id) {
            movie.is_available = available;
        }
    }

    fn matching(&self, filter: &MovieFilter) -> Vec<Movie> {
        let needle = filter.search.as_deref().map(str::to_lowercase);
        let mut matched: Vec<Movie> = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| !filter.available_only || m.is_available)
            .filter(|m| {
                filter
                    .genre
                    .as_deref()
                    .map_or(true, |g| m.genres.iter().any(|mg| mg == g))
            })
            .filter(|m| filter.year.map_or(true, |y| m.year == y))
            .filter(|m| {
                needle.as_deref().map_or(true, |n| {
                    m.title.to_lowercase().contains(n)
                        || m.description.to_lowercase().contains(n)
                        || m.director.to_lowercase().contains(n)
                        || m.actors.iter().any(|a| a.to_lowercase().contains(n))
                })
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.added_date.cmp(&a.added_date).then(b.id.cmp(&a.id)));
        matched
    }
}

#[async_trait]
impl MovieRepository for FakeMovieRepository {
    async fn create(&self, new_movie: NewMovie) -> Result<Movie, AppError> {
        let movie = Movie {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: new_movie.title,
            year: new_movie.year,
            genres: new_movie.genres,
            language: new_movie.language,
            country: new_movie.country,
            duration: new_movie.duration,
            description: new_movie.description,
            director: new_movie.director,
            rating: new_movie.rating,
            actors: new_movie.actors,
            added_date: Utc::now(),
            is_available: new_movie.is_available,
        };
        self.movies.lock().unwrap().push(movie.clone());
        Ok(movie)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Movie>, AppError> {
        Ok(self.get(id))
    }

    async fn list(
        &self,
        filter: &MovieFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Movie>, AppError> {
        Ok(self
            .matching(filter)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &MovieFilter) -> Result<i64, AppError> {
        Ok(self.matching(filter).len() as i64)
    }

    async fn update(&self, id: i64, patch: MoviePatch) -> Result<Movie, AppError> {
        let mut movies = self.movies.lock().unwrap();
        let movie = movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| AppError::not_found("Movie not found", json!({ "id": id })))?;
        if let Some(v) = patch.title {
            movie.title = v;
        }
        if let Some(v) = patch.year {
            movie.year = v;
        }
        if let Some(v) = patch.genres {
            movie.genres = v;
        }
        if let Some(v) = patch.language {
            movie.language = v;
        }
        if let Some(v) = patch.country {
            movie.country = v;
        }
        if let Some(v) = patch.duration {
            movie.duration = v;
        }
        if let Some(v) = patch.description {
            movie.description = v;
        }
        if let Some(v) = patch.director {
            movie.director = v;
        }
        if let Some(v) = patch.rating {
            movie.rating = v;
        }
        if let Some(v) = patch.actors {
            movie.actors = v;
        }
        if let Some(v) = patch.is_available {
            movie.is_available = v;
        }
        Ok(movie.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut movies = self.movies.lock().unwrap();
        let before = movies.len();
        movies.retain(|m| m.id != id);
        Ok(movies.len() < before)
    }

    async fn distinct_genres(&self) -> Result<Vec<String>, AppError> {
        let mut genres: Vec<String> = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .flat_map(|m| m.genres.clone())
            .collect();
        genres.sort();
        genres.dedup();
        Ok(genres)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Rental fake that mirrors the transactional semantics of the PostgreSQL
/// implementation: rent and approve adjust movie availability and the
/// client counter together under one lock.
pub struct FakeRentalRepository {
    rentals: Mutex<Vec<Rental>>,
    next_id: AtomicI64,
    movies: Arc<FakeMovieRepository>,
    clients: Arc<FakeClientRepository>,
}

impl FakeRentalRepository {
    pub fn new(movies: Arc<FakeMovieRepository>, clients: Arc<FakeClientRepository>) -> Self {
        Self {
            rentals: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            movies,
            clients,
        }
    }

    pub fn get(&self, id: i64) -> Option<Rental> {
        self.rentals.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }
}

#[async_trait]
impl RentalRepository for FakeRentalRepository {
    async fn rent(&self, new_rental: NewRental) -> Result<Rental, AppError> {
        let mut rentals = self.rentals.lock().unwrap();

        if rentals.iter().any(|r| {
            r.client_id == new_rental.client_id && r.movie_id == new_rental.movie_id && r.is_live()
        }) {
            return Err(AppError::conflict(
                "Movie is already rented by this client",
                json!({}),
            ));
        }

        let movie = self
            .movies
            .get(new_rental.movie_id)
            .filter(|m| m.is_available)
            .ok_or_else(|| {
                AppError::invariant_violation("Movie is not available for rental", json!({}))
            })?;

        let client = self
            .clients
            .get(new_rental.client_id)
            .ok_or_else(|| AppError::not_found("Client not found", json!({})))?;
        if i64::from(client.active_rentals_count) >= MAX_ACTIVE_RENTALS {
            return Err(AppError::invariant_violation(
                "Maximum number of active rentals reached",
                json!({}),
            ));
        }

        self.movies.set_available(movie.id, false);
        self.clients.adjust_counter(client.id, 1);

        let rental = Rental {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            client_id: new_rental.client_id,
            movie_id: new_rental.movie_id,
            movie_title: new_rental.movie_title,
            rental_date: new_rental.rental_date,
            planned_return_date: new_rental.planned_return_date,
            return_request_date: None,
            actual_return_date: None,
            status: RentalStatus::Active,
        };
        rentals.push(rental.clone());
        Ok(rental)
    }

    async fn request_return(
        &self,
        client_id: i64,
        movie_id: i64,
    ) -> Result<Option<Rental>, AppError> {
        let mut rentals = self.rentals.lock().unwrap();
        let rental = rentals.iter_mut().find(|r| {
            r.client_id == client_id && r.movie_id == movie_id && r.status == RentalStatus::Active
        });
        Ok(rental.map(|r| {
            r.status = RentalStatus::PendingReturn;
            r.return_request_date = Some(Utc::now());
            r.clone()
        }))
    }

    async fn approve_return(&self, rental_id: i64) -> Result<Option<Rental>, AppError> {
        let mut rentals = self.rentals.lock().unwrap();
        let Some(rental) = rentals
            .iter_mut()
            .find(|r| r.id == rental_id && r.status == RentalStatus::PendingReturn)
        else {
            return Ok(None);
        };
        rental.status = RentalStatus::Returned;
        rental.actual_return_date = Some(Utc::now());
        let rental = rental.clone();

        self.clients.adjust_counter(rental.client_id, -1);
        self.movies.set_available(rental.movie_id, true);
        Ok(Some(rental))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Rental>, AppError> {
        Ok(self.get(id))
    }

    async fn find_for_client(
        &self,
        id: i64,
        client_id: i64,
    ) -> Result<Option<Rental>, AppError> {
        Ok(self.get(id).filter(|r| r.client_id == client_id))
    }

    async fn find_active(
        &self,
        client_id: i64,
        movie_id: i64,
    ) -> Result<Option<Rental>, AppError> {
        Ok(self
            .rentals
            .lock()
            .unwrap()
            .iter()
            .find(|r| {
                r.client_id == client_id
                    && r.movie_id == movie_id
                    && r.status == RentalStatus::Active
            })
            .cloned())
    }

    async fn count_active_for_client(&self, client_id: i64) -> Result<i64, AppError> {
        Ok(self
            .rentals
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.client_id == client_id && r.status == RentalStatus::Active)
            .count() as i64)
    }

    async fn count_active_for_movie(&self, movie_id: i64) -> Result<i64, AppError> {
        Ok(self
            .rentals
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.movie_id == movie_id && r.status == RentalStatus::Active)
            .count() as i64)
    }

    async fn list_for_client(&self, client_id: i64) -> Result<Vec<Rental>, AppError> {
        let mut rentals: Vec<Rental> = self
            .rentals
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.client_id == client_id)
            .cloned()
            .collect();
        rentals.sort_by(|a, b| b.rental_date.cmp(&a.rental_date));
        Ok(rentals)
    }

    async fn list_details(
        &self,
        status: Option<RentalStatus>,
    ) -> Result<Vec<RentalDetails>, AppError> {
        let rentals = self.rentals.lock().unwrap().clone();
        Ok(rentals
            .into_iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .map(|rental| {
                let client = self.clients.get(rental.client_id);
                let movie = self.movies.get(rental.movie_id);
                RentalDetails {
                    client_first_name: client.as_ref().map(|c| c.first_name.clone()),
                    client_last_name: client.as_ref().map(|c| c.last_name.clone()),
                    client_email: client.as_ref().map(|c| c.email.clone()),
                    client_phone: client.as_ref().map(|c| c.phone.clone()),
                    movie_title: movie.as_ref().map(|m| m.title.clone()),
                    movie_genres: movie.as_ref().map(|m| m.genres.clone()),
                    rental,
                }
            })
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut rentals = self.rentals.lock().unwrap();
        let before = rentals.len();
        rentals.retain(|r| r.id != id);
        Ok(rentals.len() < before)
    }
}

/// Identity resolver fake mapping tokens to users, with a switch simulating
/// an identity component outage.
pub struct FakeIdentityResolver {
    users: Mutex<HashMap<String, AuthUser>>,
    unavailable: AtomicBool,
}

impl FakeIdentityResolver {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn grant(&self, token: &str, user: AuthUser) {
        self.users.lock().unwrap().insert(token.to_string(), user);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityResolver for FakeIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<AuthUser, AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::service_unavailable(
                "Identity service is unavailable",
                json!({}),
            ));
        }
        self.users
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| {
                AppError::unauthorized("Invalid authentication credentials", json!({}))
            })
    }

    async fn health_check(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }
}

pub fn auth_user(client: &Client) -> AuthUser {
    AuthUser {
        id: client.id,
        first_name: client.first_name.clone(),
        last_name: client.last_name.clone(),
        email: client.email.clone(),
        address: client.address.clone(),
        phone: client.phone.clone(),
        role: client.role,
        registration_date: client.registration_date,
        active_rentals_count: client.active_rentals_count,
    }
}

pub fn new_client(first: &str, last: &str, email: &str, role: Role) -> NewClient {
    NewClient {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        password_hash: String::new(),
        address: "ul. Testowa 1".to_string(),
        phone: "+48123456789".to_string(),
        role,
    }
}

pub fn new_movie(title: &str) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        year: 1999,
        genres: vec!["Drama".to_string()],
        language: "en".to_string(),
        country: "US".to_string(),
        duration: 120,
        description: String::new(),
        director: String::new(),
        rating: 7.5,
        actors: vec![],
        is_available: true,
    }
}

/// Everything the catalog tests need: the wired state plus handles on the
/// fakes for direct inspection.
pub struct CatalogHarness {
    pub state: CatalogState,
    pub movies: Arc<FakeMovieRepository>,
    pub clients: Arc<FakeClientRepository>,
    pub rentals: Arc<FakeRentalRepository>,
    pub resolver: Arc<FakeIdentityResolver>,
}

pub fn catalog_harness() -> CatalogHarness {
    let movies = Arc::new(FakeMovieRepository::new());
    let clients = Arc::new(FakeClientRepository::new());
    let rentals = Arc::new(FakeRentalRepository::new(movies.clone(), clients.clone()));
    let resolver = Arc::new(FakeIdentityResolver::new());

    let state = CatalogState {
        movie_service: Arc::new(MovieService::new(
            movies.clone(),
            rentals.clone(),
            Arc::new(MemoryCache::new(std::time::Duration::from_millis(0))),
        )),
        rental_service: Arc::new(RentalService::new(
            rentals.clone(),
            movies.clone(),
            clients.clone(),
        )),
        identity_resolver: resolver.clone(),
    };

    CatalogHarness {
        state,
        movies,
        clients,
        rentals,
        resolver,
    }
}

pub struct IdentityHarness {
    pub state: IdentityState,
    pub clients: Arc<FakeClientRepository>,
    pub tokens: TokenCodec,
}

pub fn identity_harness() -> IdentityHarness {
    let clients = Arc::new(FakeClientRepository::new());
    // Low bcrypt cost keeps the suite fast.
    let hasher = PasswordHasher::new(HashScheme::Bcrypt, 4);
    let tokens = TokenCodec::new("test-secret", 30);

    let state = IdentityState {
        identity_service: Arc::new(IdentityService::new(
            clients.clone(),
            hasher,
            tokens.clone(),
        )),
    };

    IdentityHarness {
        state,
        clients,
        tokens,
    }
}
