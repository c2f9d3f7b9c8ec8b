//! Tool adapters exposed to the agent.

mod calculator;
mod currency;
mod places;
mod weather;

pub use calculator::{
    AddNumbers, CalculateDailyBudget, CalculatePerPersonCost, CalculatePercentage,
    CalculateTotalExpenses, MultiplyNumbers,
};
pub use currency::{
    ConvertCurrency, ConvertMultipleCurrencies, GetExchangeRate, GetSupportedCurrencies,
};
pub use places::{
    GetComprehensiveTravelInfo, SearchHotels, SearchPlaceInfo, SearchRestaurants,
    SearchTouristAttractions,
};
pub use weather::{GetCurrentWeather, GetWeatherForecast};
