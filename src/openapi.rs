use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::beaches::{
    Accessibility, BeachConfig, BeachListResponse, BeachSummary, Coordinates, SummaryCoordinates,
    WindProtection,
};
use crate::error::ErrorResponse;
use crate::scoring::{Activity, BandTier, MetricBands, RatingBand, RatingCriteria, ScoreTier};
use crate::weather::models::{
    BeachWeather, DailyForecast, Forecast, HourlyForecast, Marine, MarineHourly, Recommendation,
    RecommendationsResponse, WeatherEnvelope,
};

/// OpenAPI documentation for the StrandWetter API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "StrandWetter Deutschland API",
        version = "1.0.0",
        description = "Beach weather for the German Baltic coast. Serves Open-Meteo forecast and marine data per beach together with a 0-100 beach score and the best time of day.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    tags(
        (name = "beaches", description = "Beach catalog and regions"),
        (name = "weather", description = "Scored beach weather"),
        (name = "recommendations", description = "Beaches ranked by score")
    ),
    components(
        schemas(
            ErrorResponse,
            BeachConfig,
            BeachSummary,
            BeachListResponse,
            Coordinates,
            SummaryCoordinates,
            WindProtection,
            Accessibility,
            WeatherEnvelope,
            BeachWeather,
            Forecast,
            HourlyForecast,
            DailyForecast,
            Marine,
            MarineHourly,
            Recommendation,
            RecommendationsResponse,
            Activity,
            ScoreTier,
            BandTier,
            RatingBand,
            MetricBands,
            RatingCriteria,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
