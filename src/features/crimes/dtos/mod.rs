mod crime_dto;

pub use crime_dto::{
    CreateCrimeDto, CrimeListQuery, CrimeResponseDto, CrimeStatsDto, CrimeTypeCountDto,
    UpdateCrimeDto, MSG_MISSING_REQUIRED,
};
