//! Solution type.

use serde::{Deserialize, Serialize};

use super::Route;

/// An ordered set of routes.
///
/// A solution is valid when its route interiors partition the instance's
/// customers and every route respects capacity; see
/// [`check_feasibility`](crate::evaluation::check_feasibility).
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::from_customers(1, &[2, 3]));
/// sol.add_route(Route::from_customers(1, &[4]));
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Creates a solution from routes.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Appends a route.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Returns the routes.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns a mutable reference to the routes.
    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of customer visits across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// All customer visits, route by route.
    pub fn customer_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.routes.iter().flat_map(|r| r.customers().iter().copied())
    }

    /// Consumes the solution, returning its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}
