use nt_core::ArticleRecord;
use tracing::debug;

/// A screen plus its navigation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    News,
    SingleNews(ArticleRecord),
    FavoritesNews,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::News => "News",
            Route::SingleNews(_) => "SingleNews",
            Route::FavoritesNews => "FavoritesNews",
        }
    }
}

/// Stack navigator.
///
/// Navigating to a screen already on the stack pops back to it and replaces
/// its payload; otherwise the screen is pushed.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Login)
    }
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self { stack: vec![initial] }
    }

    pub fn current(&self) -> &Route {
        // The root is never popped.
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn navigate(&mut self, route: Route) {
        match self.stack.iter().rposition(|r| r.name() == route.name()) {
            Some(position) => {
                self.stack.truncate(position);
                self.stack.push(route);
            }
            None => self.stack.push(route),
        }
        debug!("🧭 Navigated to {} (depth {})", self.current().name(), self.depth());
    }

    /// Pop the current screen. Returns false at the root.
    pub fn go_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    /// The article attached to the current screen, if any.
    pub fn payload(&self) -> Option<&ArticleRecord> {
        match self.current() {
            Route::SingleNews(article) => Some(article),
            _ => None,
        }
    }
}
