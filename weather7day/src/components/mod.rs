pub mod help_bar;
pub mod location_header;
pub mod weather_7day;
pub mod weather_7day_display;
pub mod weather_7day_error;
pub mod weather_7day_loading;

pub use weather7day_core::Component;

pub use help_bar::{HelpBar, HelpBarProps};
pub use location_header::{LocationHeader, LocationHeaderProps};
pub use weather_7day::{Weather7Day, Weather7DayProps};
pub use weather_7day_display::{Weather7DayDisplay, Weather7DayDisplayProps};
pub use weather_7day_error::{ERROR_ICON, Weather7DayError, Weather7DayErrorProps};
pub use weather_7day_loading::{SPINNERS, Weather7DayLoading, Weather7DayLoadingProps};
