pub mod hourly_variable;
pub mod lat_lon;
