use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBody { pub error: String }

#[derive(ToSchema)]
pub struct RestaurantDoc {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub rating: Option<f64>,
    /// Set by the database backend only
    #[schema(rename = "createdAt")]
    pub created_at: Option<String>,
    #[schema(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

#[derive(ToSchema)]
pub struct RestaurantListDoc { pub restaurants: Vec<RestaurantDoc> }

#[derive(ToSchema)]
pub struct NewRestaurantDoc {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub rating: Option<f64>,
}

/// Fields left out stay unchanged; `rating: null` clears the rating.
#[derive(ToSchema)]
pub struct RestaurantPatchDoc {
    pub address: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<f64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::restaurants::list,
        crate::routes::restaurants::find,
        crate::routes::restaurants::create,
        crate::routes::restaurants::delete,
        crate::routes::restaurants::patch,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            RestaurantDoc,
            RestaurantListDoc,
            NewRestaurantDoc,
            RestaurantPatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "restaurant")
    )
)]
pub struct ApiDoc;
