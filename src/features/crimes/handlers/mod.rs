pub mod crime_handler;

pub use crime_handler::{
    __path_create_crime, __path_delete_crime, __path_get_crime, __path_get_stats,
    __path_list_crimes, __path_update_crime, create_crime, delete_crime, get_crime, get_stats,
    list_crimes, update_crime,
};
