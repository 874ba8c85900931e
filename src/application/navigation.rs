/// Pages the client can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Profile,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Profile => "/profile",
        }
    }
}

/// Result of a page action: either it completed on the current page or the
/// user must be sent elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    Redirect(Route),
}

impl<T> Outcome<T> {
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Outcome::Redirect(route) => Some(*route),
            Outcome::Done(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Done(value) => Outcome::Done(f(value)),
            Outcome::Redirect(route) => Outcome::Redirect(route),
        }
    }
}
