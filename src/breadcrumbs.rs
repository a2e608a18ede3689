//! Breadcrumb navigation model.
//!
//! A [`BreadcrumbsModel`] accepts linked entries until an active (current page)
//! entry is added. After that the trail is closed and further additions fail.

use serde::Serialize;

use crate::error::{Error, Result};

/// One navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub title: String,
    pub url: Option<String>,
    pub is_active: bool,
}

/// Ordered breadcrumb trail, rendered by templates or serialized to JSON.
///
/// # Examples
///
/// ```
/// use weblinks::breadcrumbs::BreadcrumbsModel;
///
/// let mut model = BreadcrumbsModel::new();
/// model
///     .add("Home", "/")?
///     .add("Categories", "categories")?
///     .add_active("Sports")?;
///
/// assert!(model.is_closed());
/// assert!(model.add("News", "news").is_err());
/// # Ok::<(), weblinks::Error>(())
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct BreadcrumbsModel {
    breadcrumbs: Vec<Breadcrumb>,
}

impl BreadcrumbsModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a linked entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if an active entry was already added.
    pub fn add(&mut self, title: impl Into<String>, url: impl Into<String>) -> Result<&mut Self> {
        self.push(Breadcrumb {
            title: title.into(),
            url: Some(url.into()),
            is_active: false,
        })
    }

    /// Appends the active entry and closes the trail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if an active entry was already added.
    pub fn add_active(&mut self, title: impl Into<String>) -> Result<&mut Self> {
        self.push(Breadcrumb {
            title: title.into(),
            url: None,
            is_active: true,
        })
    }

    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        &self.breadcrumbs
    }

    /// The active entry, if the trail is closed.
    pub fn active(&self) -> Option<&Breadcrumb> {
        self.breadcrumbs.last().filter(|b| b.is_active)
    }

    pub fn is_closed(&self) -> bool {
        self.active().is_some()
    }

    pub fn len(&self) -> usize {
        self.breadcrumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breadcrumbs.is_empty()
    }

    fn push(&mut self, breadcrumb: Breadcrumb) -> Result<&mut Self> {
        if let Some(active) = self.active() {
            return Err(Error::InvalidState(format!(
                "cannot add '{}' after active breadcrumb '{}'",
                breadcrumb.title, active.title
            )));
        }

        self.breadcrumbs.push(breadcrumb);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_model() -> BreadcrumbsModel {
        let mut model = BreadcrumbsModel::new();
        model
            .add("Home", "/")
            .unwrap()
            .add("Categories", "categories")
            .unwrap()
            .add_active("Sports")
            .unwrap();
        model
    }

    #[test]
    fn test_add_breadcrumbs_in_order() {
        let model = closed_model();
        let crumbs = model.breadcrumbs();

        assert_eq!(crumbs.len(), 3);

        assert_eq!(crumbs[0].title, "Home");
        assert_eq!(crumbs[0].url.as_deref(), Some("/"));
        assert!(!crumbs[0].is_active);

        assert_eq!(crumbs[1].title, "Categories");
        assert_eq!(crumbs[1].url.as_deref(), Some("categories"));
        assert!(!crumbs[1].is_active);

        assert_eq!(crumbs[2].title, "Sports");
        assert!(crumbs[2].url.is_none());
        assert!(crumbs[2].is_active);
    }

    #[test]
    fn test_add_after_active_fails() {
        let mut model = closed_model();

        let result = model.add("News", "news");
        assert!(matches!(result, Err(Error::InvalidState(_))));
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn test_add_active_twice_fails() {
        let mut model = closed_model();

        let result = model.add_active("Football");
        assert!(matches!(result, Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_open_model_has_no_active() {
        let mut model = BreadcrumbsModel::new();
        assert!(model.is_empty());
        assert!(!model.is_closed());

        model.add("Home", "/").unwrap();
        assert!(model.active().is_none());
        assert!(!model.is_closed());
    }

    #[test]
    fn test_active_is_last() {
        let model = closed_model();
        assert_eq!(model.active().map(|b| b.title.as_str()), Some("Sports"));
    }

    #[test]
    fn test_serialize_to_json() {
        let mut model = BreadcrumbsModel::new();
        model.add("Home", "/").unwrap().add_active("Sports").unwrap();

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["breadcrumbs"][0]["url"], "/");
        assert_eq!(json["breadcrumbs"][1]["url"], serde_json::Value::Null);
        assert_eq!(json["breadcrumbs"][1]["is_active"], true);
    }
}
