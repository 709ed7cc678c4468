//! Search criteria for Magento list endpoints.
//!
//! Magento's list endpoints take a bracketed query-string filter language:
//!
//! ```text
//! searchCriteria[filter_groups][0][filters][0][field]=name
//! searchCriteria[filter_groups][0][filters][0][value]=%shirt%
//! searchCriteria[filter_groups][0][filters][0][condition_type]=like
//! ```
//!
//! Filters inside one group are OR-ed; groups are AND-ed.
//!
//! # Example
//!
//! ```rust
//! use magento_api::resources::{Condition, SearchCriteria, SortDirection};
//!
//! let criteria = SearchCriteria::new()
//!     .filter("status", Condition::Eq, "1")
//!     .any_of([("type_id", Condition::Eq, "simple"), ("type_id", Condition::Eq, "virtual")])
//!     .sort_by("created_at", SortDirection::Desc)
//!     .page_size(20);
//!
//! let query = criteria.to_query();
//! assert_eq!(query["searchCriteria[filter_groups][1][filters][1][value]"], "virtual");
//! assert_eq!(query["searchCriteria[pageSize]"], "20");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::ResourceError;

/// A comparison operator for a search filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Equals.
    Eq,
    /// Not equal.
    Neq,
    /// SQL `LIKE`; use `%` as the wildcard.
    Like,
    /// SQL `NOT LIKE`.
    Nlike,
    /// Value is in a comma-separated list.
    In,
    /// Value is not in a comma-separated list.
    Nin,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gteq,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lteq,
    /// Field is null.
    Null,
    /// Field is not null.
    NotNull,
    /// Value is within a comma-separated set field.
    Finset,
    /// Range start, inclusive.
    From,
    /// Range end, inclusive.
    To,
}

impl Condition {
    /// Returns the `condition_type` string Magento expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Like => "like",
            Self::Nlike => "nlike",
            Self::In => "in",
            Self::Nin => "nin",
            Self::Gt => "gt",
            Self::Gteq => "gteq",
            Self::Lt => "lt",
            Self::Lteq => "lteq",
            Self::Null => "null",
            Self::NotNull => "notnull",
            Self::Finset => "finset",
            Self::From => "from",
            Self::To => "to",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = ResourceError;

    /// Parses an operator name. `ilike` is accepted as an alias of `like`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let condition = match s {
            "eq" => Self::Eq,
            "neq" => Self::Neq,
            "like" | "ilike" => Self::Like,
            "nlike" => Self::Nlike,
            "in" => Self::In,
            "nin" => Self::Nin,
            "gt" => Self::Gt,
            "gteq" => Self::Gteq,
            "lt" => Self::Lt,
            "lteq" => Self::Lteq,
            "null" => Self::Null,
            "notnull" => Self::NotNull,
            "finset" => Self::Finset,
            "from" => Self::From,
            "to" => Self::To,
            other => {
                return Err(ResourceError::InvalidArgument {
                    reason: format!("unknown filter condition '{other}'"),
                })
            }
        };
        Ok(condition)
    }
}

/// One `field condition value` filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    /// The attribute code to filter on.
    pub field: String,
    /// The comparison operator.
    pub condition: Condition,
    /// The comparison value, as sent on the wire.
    pub value: String,
}

impl Filter {
    /// Creates a filter.
    #[must_use]
    pub fn new(field: impl Into<String>, condition: Condition, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            condition,
            value: value.into(),
        }
    }
}

/// Sort direction for a sort order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Filter groups, sort orders and paging for a list endpoint.
///
/// An empty criteria still produces a `searchCriteria` parameter, which the
/// list endpoints require.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    filter_groups: Vec<Vec<Filter>>,
    sort_orders: Vec<(String, SortDirection)>,
    page_size: Option<u32>,
    current_page: Option<u32>,
}

impl SearchCriteria {
    /// Creates an empty criteria.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter in its own group, AND-ed with the other groups.
    #[must_use]
    pub fn filter(
        mut self,
        field: impl Into<String>,
        condition: Condition,
        value: impl Into<String>,
    ) -> Self {
        self.filter_groups
            .push(vec![Filter::new(field, condition, value)]);
        self
    }

    /// Adds a group of filters that are OR-ed together.
    #[must_use]
    pub fn any_of<F, V, I>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = (F, Condition, V)>,
        F: Into<String>,
        V: Into<String>,
    {
        let group: Vec<Filter> = filters
            .into_iter()
            .map(|(field, condition, value)| Filter::new(field, condition, value))
            .collect();
        if !group.is_empty() {
            self.filter_groups.push(group);
        }
        self
    }

    /// Adds a sort order.
    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_orders.push((field.into(), direction));
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Sets the 1-based page number.
    #[must_use]
    pub const fn current_page(mut self, page: u32) -> Self {
        self.current_page = Some(page);
        self
    }

    /// Returns the filter groups.
    #[must_use]
    pub fn filter_groups(&self) -> &[Vec<Filter>] {
        &self.filter_groups
    }

    /// Returns `true` when no filter, sort order or paging is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filter_groups.is_empty()
            && self.sort_orders.is_empty()
            && self.page_size.is_none()
            && self.current_page.is_none()
    }

    /// Builds criteria from a `{attribute: {operator: value}}` filter map.
    ///
    /// A bare `{attribute: value}` means `eq`. Array values are joined with
    /// commas, which is what `in`, `nin` and `finset` expect. Each
    /// attribute/operator pair becomes its own AND-ed group.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] if the map is not an
    /// object, an operator is unknown, or a value is not a scalar or an
    /// array of scalars.
    ///
    /// # Example
    ///
    /// ```rust
    /// use magento_api::resources::SearchCriteria;
    /// use serde_json::json;
    ///
    /// let criteria = SearchCriteria::from_filter_map(&json!({
    ///     "sku": {"like": "MH%"},
    ///     "entity_id": {"in": [1, 2, 3]},
    /// })).unwrap();
    /// assert_eq!(criteria.filter_groups().len(), 2);
    /// ```
    pub fn from_filter_map(filters: &Value) -> Result<Self, ResourceError> {
        let Value::Object(attributes) = filters else {
            return Err(ResourceError::InvalidArgument {
                reason: format!("filters must be a JSON object, got {filters}"),
            });
        };

        let mut criteria = Self::new();
        for (field, spec) in attributes {
            match spec {
                Value::Object(operators) => {
                    for (operator, value) in operators {
                        let condition = operator.parse()?;
                        criteria = criteria.filter(field, condition, filter_value(value)?);
                    }
                }
                value => {
                    criteria = criteria.filter(field, Condition::Eq, filter_value(value)?);
                }
            }
        }
        Ok(criteria)
    }

    /// Flattens the criteria into query parameters.
    #[must_use]
    pub fn to_query(&self) -> HashMap<String, String> {
        let mut query = HashMap::new();

        for (i, group) in self.filter_groups.iter().enumerate() {
            for (j, filter) in group.iter().enumerate() {
                let prefix = format!("searchCriteria[filter_groups][{i}][filters][{j}]");
                query.insert(format!("{prefix}[field]"), filter.field.clone());
                query.insert(format!("{prefix}[value]"), filter.value.clone());
                query.insert(
                    format!("{prefix}[condition_type]"),
                    filter.condition.as_str().to_string(),
                );
            }
        }

        for (k, (field, direction)) in self.sort_orders.iter().enumerate() {
            query.insert(format!("searchCriteria[sortOrders][{k}][field]"), field.clone());
            query.insert(
                format!("searchCriteria[sortOrders][{k}][direction]"),
                direction.as_str().to_string(),
            );
        }

        if let Some(size) = self.page_size {
            query.insert("searchCriteria[pageSize]".to_string(), size.to_string());
        }
        if let Some(page) = self.current_page {
            query.insert("searchCriteria[currentPage]".to_string(), page.to_string());
        }

        if query.is_empty() {
            query.insert("searchCriteria".to_string(), String::new());
        }
        query
    }
}

fn scalar_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn filter_value(value: &Value) -> Result<String, ResourceError> {
    let rendered = match value {
        Value::Array(items) => items
            .iter()
            .map(scalar_value)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(",")),
        other => scalar_value(other),
    };

    rendered.ok_or_else(|| ResourceError::InvalidArgument {
        reason: format!("unsupported filter value {value}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_criteria_sends_bare_parameter() {
        let query = SearchCriteria::new().to_query();
        assert_eq!(query.len(), 1);
        assert_eq!(query["searchCriteria"], "");
    }

    #[test]
    fn test_filters_in_separate_groups() {
        let query = SearchCriteria::new()
            .filter("name", Condition::Like, "%bag%")
            .filter("price", Condition::Gt, "10")
            .to_query();

        assert_eq!(query["searchCriteria[filter_groups][0][filters][0][field]"], "name");
        assert_eq!(query["searchCriteria[filter_groups][0][filters][0][value]"], "%bag%");
        assert_eq!(
            query["searchCriteria[filter_groups][0][filters][0][condition_type]"],
            "like"
        );
        assert_eq!(query["searchCriteria[filter_groups][1][filters][0][field]"], "price");
        assert_eq!(
            query["searchCriteria[filter_groups][1][filters][0][condition_type]"],
            "gt"
        );
        assert!(!query.contains_key("searchCriteria"));
    }

    #[test]
    fn test_any_of_shares_one_group() {
        let criteria = SearchCriteria::new().any_of([
            ("email", Condition::Eq, "a@example.com"),
            ("email", Condition::Eq, "b@example.com"),
        ]);
        assert_eq!(criteria.filter_groups().len(), 1);

        let query = criteria.to_query();
        assert_eq!(
            query["searchCriteria[filter_groups][0][filters][1][value]"],
            "b@example.com"
        );
    }

    #[test]
    fn test_any_of_ignores_empty_groups() {
        let criteria =
            SearchCriteria::new().any_of(Vec::<(String, Condition, String)>::new());
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_sort_and_paging() {
        let query = SearchCriteria::new()
            .sort_by("created_at", SortDirection::Desc)
            .sort_by("name", SortDirection::Asc)
            .page_size(50)
            .current_page(2)
            .to_query();

        assert_eq!(query["searchCriteria[sortOrders][0][field]"], "created_at");
        assert_eq!(query["searchCriteria[sortOrders][0][direction]"], "DESC");
        assert_eq!(query["searchCriteria[sortOrders][1][direction]"], "ASC");
        assert_eq!(query["searchCriteria[pageSize]"], "50");
        assert_eq!(query["searchCriteria[currentPage]"], "2");
    }

    #[test]
    fn test_condition_parse() {
        assert_eq!("notnull".parse::<Condition>().unwrap(), Condition::NotNull);
        assert_eq!("ilike".parse::<Condition>().unwrap(), Condition::Like);
        assert!("between".parse::<Condition>().is_err());
        assert_eq!(Condition::Finset.to_string(), "finset");
    }

    #[test]
    fn test_from_filter_map() {
        let criteria = SearchCriteria::from_filter_map(&json!({
            "entity_id": {"in": [1, 2, 3]},
            "status": 1,
        }))
        .unwrap();

        let query = criteria.to_query();
        let mut fields: Vec<(&str, &str, &str)> = (0..2)
            .map(|i| {
                let prefix = format!("searchCriteria[filter_groups][{i}][filters][0]");
                (
                    query[&format!("{prefix}[field]")].as_str(),
                    query[&format!("{prefix}[condition_type]")].as_str(),
                    query[&format!("{prefix}[value]")].as_str(),
                )
            })
            .collect();
        fields.sort_unstable();

        assert_eq!(fields, vec![("entity_id", "in", "1,2,3"), ("status", "eq", "1")]);
    }

    #[test]
    fn test_from_filter_map_rejects_bad_input() {
        assert!(SearchCriteria::from_filter_map(&json!([1])).is_err());
        assert!(SearchCriteria::from_filter_map(&json!({"sku": {"between": "a"}})).is_err());
        assert!(SearchCriteria::from_filter_map(&json!({"sku": {"eq": {"x": 1}}})).is_err());
        assert!(SearchCriteria::from_filter_map(&json!({"sku": [[1]]})).is_err());
    }
}
