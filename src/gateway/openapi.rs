//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{AccountApiData, TransferApiData, TransferApiRequest};
use crate::transfer::TransferStatus;

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Transfer API",
        version = "1.0.0",
        description = "Account directory and atomic transfers between accounts.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::account::list_accounts,
        crate::gateway::handlers::account::get_account_balance,
        crate::gateway::handlers::transfer::create_transfer,
    ),
    components(
        schemas(
            HealthResponse,
            AccountApiData,
            TransferApiRequest,
            TransferApiData,
            TransferStatus,
        )
    ),
    tags(
        (name = "Account", description = "Account directory queries"),
        (name = "Transfer", description = "Transfers between accounts"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
