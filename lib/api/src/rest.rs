use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use logoguide_core::Error;
use logoguide_guide::GuideModel;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Deserialize)]
struct GuideQuery {
    description: Option<String>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(model: Arc<GuideModel>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(model.clone()))
                .route("/logoguide", web::get().to(logo_guide))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn logo_guide(
    model: web::Data<Arc<GuideModel>>,
    query: web::Query<GuideQuery>,
) -> ActixResult<HttpResponse> {
    let Some(description) = query.description.as_deref() else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Please specify a description"
        })));
    };

    debug!(description, "logoguide query");
    match model.query(description) {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(Error::EmptyQuery) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Please specify a non-empty description"
        }))),
        Err(e) => Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": e.to_string()
        }))),
    }
}
