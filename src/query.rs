//! Turns list query parameters into the filter, sort and page that list
//! endpoints apply to their SeaORM selects.

use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select,
    sea_query::IntoCondition,
};

use crate::{
    error::{AppError, AppResult},
    response::Meta,
    routes::params::ListQuery,
};

pub const MAX_LIMIT: u64 = 100;
/// Largest offset Postgres accepts as a bigint.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<u64>,
    pub offset: u64,
}

impl Page {
    pub fn from_query(query: &ListQuery) -> AppResult<Self> {
        let offset = query.offset.unwrap_or(0);
        if offset > MAX_OFFSET {
            return Err(AppError::BadRequest(format!(
                "offset must not exceed {MAX_OFFSET}"
            )));
        }
        Ok(Self {
            limit: query.limit.map(|l| l.clamp(1, MAX_LIMIT)),
            offset,
        })
    }

    /// 1-based page number derived from offset and limit.
    pub fn number(&self) -> i64 {
        match self.limit {
            Some(limit) => {
                let page = (self.offset / limit).saturating_add(1);
                i64::try_from(page).unwrap_or(i64::MAX)
            }
            None => 1,
        }
    }

    pub fn meta(&self, total: u64) -> Meta {
        Meta {
            page: Some(self.number()),
            per_page: self.limit.map(|l| l as i64),
            total: Some(total as i64),
        }
    }

    pub fn apply<Q: QuerySelect>(&self, mut query: Q) -> Q {
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        if self.offset > 0 {
            query = query.offset(self.offset);
        }
        query
    }
}

/// Filter, sort and page for one entity's list query.
#[derive(Debug, Clone)]
pub struct QueryOptions<C> {
    pub condition: Condition,
    pub sort: Option<(C, Order)>,
    pub page: Page,
}

impl<C> QueryOptions<C>
where
    C: ColumnTrait + Copy,
{
    /// `searchable` lists the columns matched by `search`; `sortable` maps the
    /// public field names accepted by `sort_by` to columns.
    pub fn build(query: &ListQuery, searchable: &[C], sortable: &[(&str, C)]) -> AppResult<Self> {
        let mut condition = Condition::all();
        if let Some(search) = query.search.as_ref().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            if !searchable.is_empty() {
                let any = searchable
                    .iter()
                    .fold(Condition::any(), |any, col| any.add(col.contains(search)));
                condition = condition.add(any);
            }
        }

        let sort = match query.sort_by.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(parse_sort(raw, sortable)?),
            None => None,
        };

        Ok(Self {
            condition,
            sort,
            page: Page::from_query(query)?,
        })
    }

    pub fn filter<F: IntoCondition>(mut self, filter: F) -> Self {
        self.condition = self.condition.add(filter.into_condition());
        self
    }

    /// Sort used when the request does not name one.
    pub fn default_sort(mut self, column: C, order: Order) -> Self {
        if self.sort.is_none() {
            self.sort = Some((column, order));
        }
        self
    }

    /// Applies filter and sort. Paging is left to [`Page::apply`] so the same
    /// select can be counted first.
    pub fn apply<E>(&self, mut select: Select<E>) -> Select<E>
    where
        E: EntityTrait<Column = C>,
    {
        // An empty `Condition::all()` would render as `WHERE TRUE`.
        if !self.condition.is_empty() {
            select = select.filter(self.condition.clone());
        }
        match &self.sort {
            Some((column, order)) => select.order_by(*column, order.clone()),
            None => select,
        }
    }
}

fn parse_sort<C: Copy>(raw: &str, sortable: &[(&str, C)]) -> AppResult<(C, Order)> {
    let (field, direction) = match raw.split_once(':') {
        Some((field, direction)) => (field.trim(), Some(direction.trim())),
        None => (raw, None),
    };

    let order = match direction.map(str::to_ascii_lowercase).as_deref() {
        None | Some("asc") => Order::Asc,
        Some("desc") => Order::Desc,
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "Invalid sort direction '{other}', use asc or desc"
            )));
        }
    };

    let column = sortable
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, column)| *column)
        .ok_or_else(|| {
            let allowed: Vec<&str> = sortable.iter().map(|(name, _)| *name).collect();
            AppError::BadRequest(format!(
                "Cannot sort by '{field}', allowed: {}",
                allowed.join(", ")
            ))
        })?;

    Ok((column, order))
}
