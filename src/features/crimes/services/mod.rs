mod crime_service;

pub use crime_service::CrimeService;
