use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::consts::{HIDDEN_FIELDS_ID, INDEX_DELIMITER, NBSP};
use crate::error::{Error, Result, ResultExt};
use crate::form::Form;

static TRAILING_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)$").unwrap());

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::InvalidSelector {
        css: css.to_string(),
        message: e.to_string(),
    })
}

// Attribute selector for an id; PeopleSoft ids contain `$`.
pub(crate) fn by_id(id: &str) -> String {
    format!(r#"[id="{id}"]"#)
}

pub(crate) fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).collect())
}

// Returns the single element under `scope` matching `css`.
pub(crate) fn select_one<'a>(scope: ElementRef<'a>, css: &str, what: &str) -> Result<ElementRef<'a>> {
    let matches = select_all(scope, css)?;
    match matches.as_slice() {
        [one] => Ok(*one),
        _ => Err(Error::structure(what, matches.len())),
    }
}

pub(crate) fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

// The single element child of `el`.
pub(crate) fn only_child<'a>(el: ElementRef<'a>, what: &str) -> Result<ElementRef<'a>> {
    let children: Vec<_> = child_elements(el).collect();
    match children.as_slice() {
        [one] => Ok(*one),
        _ => Err(Error::structure(what, children.len())),
    }
}

pub fn text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

// `None` when the cell only holds the non-breaking-space placeholder.
pub fn non_placeholder(text: String) -> Option<String> {
    (text != NBSP).then_some(text)
}

pub(crate) fn parse_number<T>(text: &str, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.parse().map_err(|e: T::Err| Error::Coercion {
        what: what.to_string(),
        text: text.to_string(),
        cause: Box::new(e),
    })
}

// Trailing number of an element id, e.g. `3` for `trCLASS_MTG_VW$0_row3`.
pub fn trailing_number(id: &str) -> Option<usize> {
    TRAILING_NUMBER
        .captures(id)
        .and_then(|c| c[1].parse().ok())
}

// Ids are one-based, indices zero-based.
pub fn row_index(id: &str) -> Result<usize> {
    trailing_number(id)
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| Error::MalformedId { id: id.to_string() })
}

// Parses every data row of `table` in document order.
// Rows without an id are spacers.
pub(crate) fn parse_rows<'a, T>(
    table: ElementRef<'a>,
    mut parse: impl FnMut(ElementRef<'a>, &str) -> Result<T>,
) -> Result<Vec<T>> {
    child_elements(table)
        .enumerate()
        .filter_map(|(i, row)| row.value().attr("id").map(|id| (i, row, id)))
        .map(|(i, row, id)| parse(row, id).with_context(|| format!("row {i}")))
        .collect()
}

// Collects the hidden PeopleSoft inputs of a page into a form payload.
pub fn hidden_fields(doc: &Html) -> Result<Form> {
    let container = select_one(
        doc.root_element(),
        &format!("#{HIDDEN_FIELDS_ID}"),
        "hidden fields container",
    )?;

    Ok(child_elements(container)
        .filter(|el| el.value().name() == "input")
        .filter_map(|input| {
            let name = input.value().attr("name")?;
            let value = input.value().attr("value").unwrap_or_default();
            Some((name, value))
        })
        .collect())
}

// Finds the copy of a repeated field that belongs to one row.
#[derive(Clone, Copy)]
pub struct IndexedScraper<'a> {
    pub scope: ElementRef<'a>,
    pub index: usize,
}

impl<'a> IndexedScraper<'a> {
    pub fn new(scope: ElementRef<'a>, index: usize) -> Self {
        Self { scope, index }
    }

    // Finds the unique element with id `<field_id>$<index>` within the scope.
    pub fn find(&self, field_id: &str, what: &str) -> Result<ElementRef<'a>> {
        let id = format!("{field_id}{INDEX_DELIMITER}{}", self.index);
        let matches = select_all(self.scope, &by_id(&id))?;
        match matches.as_slice() {
            [one] => Ok(*one),
            _ => Err(Error::FieldNotFound {
                what: what.to_string(),
                index: self.index,
                count: matches.len(),
            }),
        }
    }

    pub fn text(&self, field_id: &str, what: &str) -> Result<String> {
        self.find(field_id, what).map(text)
    }

    pub fn optional_text(&self, field_id: &str, what: &str) -> Result<Option<String>> {
        self.text(field_id, what).map(non_placeholder)
    }

    pub fn number<T>(&self, field_id: &str, what: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        parse_number(&self.text(field_id, what)?, what)
    }

    pub fn optional_number<T>(&self, field_id: &str, what: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.optional_text(field_id, what)?
            .map(|t| parse_number(&t, what))
            .transpose()
    }
}
