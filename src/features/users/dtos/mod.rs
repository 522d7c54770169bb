mod user_dto;

pub(crate) use user_dto::non_blank;
pub use user_dto::{CreateUserDto, UpdateUserDto, UserRefDto, UserResponseDto};
