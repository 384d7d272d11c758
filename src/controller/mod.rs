use std::path::Path;
use std::sync::Arc;

use failure::Error as FailureError;
use futures::future;
use futures::prelude::*;
use hyper;
use hyper::header::{ContentLength, ContentType};
use hyper::server::{Request, Response, Service};
use hyper::{Get, StatusCode};
use serde_json;
use url::form_urlencoded;

use errors::*;
use models::*;
use render::render_page;
use services::*;

pub mod routing;
use self::routing::*;

pub type ControllerFuture = Box<Future<Item = Response, Error = ControllerError>>;

pub trait Controller {
    fn call(&self, request: Request) -> ControllerFuture;
}

/// A static file served from memory.
#[derive(Clone, Debug)]
pub struct Asset {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Asset {
    pub fn new(name: String, bytes: Vec<u8>) -> Self {
        Asset { name, bytes }
    }

    pub fn url(&self) -> String {
        format!("/assets/{}", self.name)
    }

    fn content_type(&self) -> ContentType {
        let extension = Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match extension.as_ref().map(String::as_str) {
            Some("jpg") | Some("jpeg") => ContentType::jpeg(),
            Some("png") => ContentType::png(),
            _ => ContentType::octet_stream(),
        }
    }
}

pub struct ControllerImpl {
    pub route_parser: Arc<RouteParser<Route>>,
    pub service_factory: Arc<Fn() -> Box<DashboardService>>,
    pub logo: Arc<Asset>,
}

impl ControllerImpl {
    pub fn new(service_factory: Arc<Fn() -> Box<DashboardService>>, logo: Arc<Asset>) -> Self {
        ControllerImpl {
            route_parser: Arc::new(make_router()),
            service_factory,
            logo,
        }
    }

    fn render_view(&self, query: Option<&str>) -> Result<DashboardView, ControllerError> {
        let request = parse_selection(query)?;
        debug!(
            "Received request for dashboard with category {:?} and city {:?}",
            request.category, request.city
        );
        (self.service_factory)().render(request).map_err(ControllerError::from)
    }
}

/// Reads `category` and `city` from a form-urlencoded query. Empty values count as absent.
pub fn parse_selection(query: Option<&str>) -> Result<SelectionRequest, ControllerError> {
    let mut request = SelectionRequest::default();
    for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        let slot = match &*key {
            "category" => &mut request.category,
            "city" => &mut request.city,
            _ => continue,
        };
        if slot.is_some() {
            return Err(ControllerError::BadRequest(format_err!("Query parameter {} given more than once", key)));
        }
        if !value.is_empty() {
            *slot = Some(value.into_owned());
        }
    }
    Ok(request)
}

fn response_with_body<B: Into<hyper::Body>>(content_type: ContentType, length: usize, body: B) -> Response {
    Response::new()
        .with_status(StatusCode::Ok)
        .with_header(content_type)
        .with_header(ContentLength(length as u64))
        .with_body(body)
}

fn html_response(body: String) -> Response {
    response_with_body(ContentType::html(), body.len(), body)
}

fn json_response(body: String) -> Response {
    response_with_body(ContentType::json(), body.len(), body)
}

impl Controller for ControllerImpl {
    fn call(&self, request: Request) -> ControllerFuture {
        let (method, uri, _, _, _) = request.deconstruct();
        let route = self.route_parser.test(uri.path());

        let result = match (method, route) {
            // GET /healthcheck
            (Get, Some(Route::Healthcheck)) => Ok(response_with_body(ContentType::plaintext(), 2, "Ok")),
            // GET /
            (Get, Some(Route::Dashboard)) => self
                .render_view(uri.query())
                .map(|view| html_response(render_page(&view, &self.logo.url()))),
            // GET /api/dashboard
            (Get, Some(Route::DashboardData)) => self.render_view(uri.query()).and_then(|view| {
                serde_json::to_string(&view)
                    .map(json_response)
                    .map_err(|e| ControllerError::InternalServerError(e.into()))
            }),
            // GET /assets/<name>
            (Get, Some(Route::Asset { name })) => {
                if name == self.logo.name {
                    Ok(response_with_body(
                        self.logo.content_type(),
                        self.logo.bytes.len(),
                        self.logo.bytes.clone(),
                    ))
                } else {
                    Err(ControllerError::NotFound)
                }
            }
            (_, Some(_)) => Err(ControllerError::MethodNotAllowed),
            (_, None) => Err(ControllerError::NotFound),
        };

        Box::new(future::result(result))
    }
}

fn status_code(error: &ControllerError) -> StatusCode {
    match *error {
        ControllerError::NotFound => StatusCode::NotFound,
        ControllerError::MethodNotAllowed => StatusCode::MethodNotAllowed,
        ControllerError::BadRequest(_) => StatusCode::BadRequest,
        ControllerError::InternalServerError(_) => StatusCode::InternalServerError,
    }
}

fn cause_chain(error: &FailureError) -> String {
    error.iter_chain().map(|cause| cause.to_string()).collect::<Vec<_>>().join(": ")
}

/// Turns a controller error into the response sent to the client.
pub fn error_response(error: &ControllerError) -> Response {
    match *error {
        ControllerError::BadRequest(ref e) | ControllerError::InternalServerError(ref e) => {
            error!("Controller error: {}", cause_chain(e))
        }
        _ => error!("Controller error: {}", error),
    }

    let body = error.to_string();
    Response::new()
        .with_status(status_code(error))
        .with_header(ContentType::plaintext())
        .with_header(ContentLength(body.len() as u64))
        .with_body(body)
}

/// Hyper service around a controller.
pub struct Application<C> {
    pub controller: C,
}

impl<C: Controller> Service for Application<C> {
    type Request = Request;
    type Response = Response;
    type Error = hyper::Error;
    type Future = Box<Future<Item = Response, Error = hyper::Error>>;

    fn call(&self, request: Request) -> Self::Future {
        debug!("Received request: {} {}", request.method(), request.uri());
        Box::new(
            self.controller
                .call(request)
                .or_else(|error| future::ok::<Response, hyper::Error>(error_response(&error))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        let request = parse_selection(Some("category=cama_mesa_banho&city=sao+paulo&page=2")).unwrap();

        assert_eq!(request.category, Some("cama_mesa_banho".to_string()));
        assert_eq!(request.city, Some("sao paulo".to_string()));
        assert_eq!(parse_selection(None).unwrap(), SelectionRequest::default());
        assert_eq!(parse_selection(Some("city=")).unwrap(), SelectionRequest::default());
        assert_eq!(
            parse_selection(Some("city=s%C3%A3o%20paulo")).unwrap().city,
            Some("são paulo".to_string())
        );
    }

    #[test]
    fn test_duplicate_parameter_is_bad_request() {
        match parse_selection(Some("city=a&city=b")) {
            Err(ControllerError::BadRequest(_)) => {}
            other => panic!("Expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_logo_content_type() {
        let logo = Asset::new("logo.2.JPG".to_string(), vec![]);

        assert_eq!(logo.content_type(), ContentType::jpeg());
        assert_eq!(logo.url(), "/assets/logo.2.JPG");
        assert_eq!(Asset::new("logo".to_string(), vec![]).content_type(), ContentType::octet_stream());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(status_code(&ControllerError::NotFound), StatusCode::NotFound);
        assert_eq!(
            error_response(&ControllerError::InternalServerError(format_err!("boom"))).status(),
            StatusCode::InternalServerError
        );
    }
}
