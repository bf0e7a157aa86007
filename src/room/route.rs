use super::types::{RoomCode, Role};
use std::fmt;

/// The two pages of the front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Entry page with the room code input and join/create actions
    Entry,
    /// Meeting page for a room, `/{code}?role=host|guest`
    Meeting { code: RoomCode, role: Role },
}

/// Raw meeting-route parameters before validation.
///
/// The session bootstrap validates these itself so that a bad code
/// produces a redirect rather than a routing failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingParams {
    pub code: Option<String>,
    pub role: Option<String>,
}

impl MeetingParams {
    /// Split a location such as `/abc-defg-hij?role=host`
    pub fn from_location(location: &str) -> Self {
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (location, None),
        };

        let code = path
            .trim_matches('/')
            .split('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(decode);

        let role = query.and_then(|q| {
            q.split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == "role")
                .map(|(_, value)| decode(value))
        });

        Self { code, role }
    }

    pub fn role(&self) -> Role {
        Role::from_query(self.role.as_deref())
    }
}

impl Route {
    pub fn meeting(code: RoomCode, role: Role) -> Self {
        Route::Meeting { code, role }
    }

    /// Parse a location into a route. Anything that is not a valid
    /// meeting path falls back to the entry page.
    pub fn parse(location: &str) -> Self {
        let params = MeetingParams::from_location(location);
        let role = params.role();

        match params.code.as_deref().map(RoomCode::parse) {
            Some(Ok(code)) => Route::Meeting { code, role },
            _ => Route::Entry,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Entry => "/".to_string(),
            Route::Meeting { code, role } => format!(
                "/{}?role={}",
                urlencoding::encode(code.as_str()),
                role.as_str()
            ),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
