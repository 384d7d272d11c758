use regex::Regex;

#[derive(Clone, Debug, PartialEq)]
pub enum Route {
    Dashboard,
    DashboardData,
    Asset { name: String },
    Healthcheck,
}

type ParamsConverter<T> = Box<Fn(Vec<&str>) -> Option<T> + Send + Sync>;

/// Matches request paths against regexes, first registered route wins.
pub struct RouteParser<T> {
    regex_and_converters: Vec<(Regex, ParamsConverter<T>)>,
}

impl<T> Default for RouteParser<T> {
    fn default() -> Self {
        RouteParser {
            regex_and_converters: vec![],
        }
    }
}

impl<T> RouteParser<T> {
    pub fn add_route<F>(&mut self, regex_pattern: &str, f: F)
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.add_route_with_params(regex_pattern, move |_| Some(f()));
    }

    /// Registers a route whose capture groups are handed to `converter`.
    pub fn add_route_with_params<F>(&mut self, regex_pattern: &str, converter: F)
    where
        F: Fn(Vec<&str>) -> Option<T> + Send + Sync + 'static,
    {
        match Regex::new(regex_pattern) {
            Ok(regex) => self.regex_and_converters.push((regex, Box::new(converter))),
            Err(e) => error!("Skipping route {}: {}", regex_pattern, e),
        }
    }

    pub fn test(&self, route: &str) -> Option<T> {
        self.regex_and_converters.iter().find_map(|&(ref regex, ref converter)| {
            regex.captures(route).and_then(|captures| {
                let params = captures
                    .iter()
                    .skip(1)
                    .filter_map(|m| m.map(|m| m.as_str()))
                    .collect::<Vec<_>>();
                converter(params)
            })
        })
    }
}

pub fn make_router() -> RouteParser<Route> {
    let mut route_parser: RouteParser<Route> = Default::default();
    route_parser.add_route(r"^/$", || Route::Dashboard);
    route_parser.add_route(r"^/api/dashboard$", || Route::DashboardData);
    route_parser.add_route(r"^/healthcheck$", || Route::Healthcheck);
    route_parser.add_route_with_params(r"^/assets/([^/]+)$", |params| {
        params
            .into_iter()
            .next()
            .map(|name| Route::Asset { name: name.to_string() })
    });
    route_parser
}
