use log::info;
use scraper::{ElementRef, Html};

use crate::client::Client;
use crate::consts::{GRADES_URL, SCHEDULES_URL};
use crate::error::{Error, Result, ResultExt};
use crate::models::Term;
use crate::scrape::{by_id, child_elements, only_child, parse_rows, row_index, select_all, select_one, IndexedScraper};
use crate::transport::Transport;

const TERMS_TABLE_ID: &str = "SSR_DUMMY_RECV1$scroll$0";

impl<T: Transport> Client<T> {
    // Fetches all the terms that the student has been enrolled for.
    pub fn terms(&self) -> Result<Vec<Term>> {
        let doc = self.get_document(GRADES_URL, "fetching grades page")?;
        let terms = parse_terms_page(&doc).context("parsing terms")?;
        info!("Found {} terms", terms.len());
        Ok(terms)
    }

    // Fetches the terms for which Quest has course schedules available.
    pub fn terms_with_schedule(&self) -> Result<Vec<Term>> {
        let doc = self.get_document(SCHEDULES_URL, "fetching course schedule page")?;
        let terms = parse_schedule_terms_page(&doc).context("parsing terms")?;
        info!("Found {} terms with schedules", terms.len());
        Ok(terms)
    }
}

// Parses the term selector of the grades page.
pub fn parse_terms_page(doc: &Html) -> Result<Vec<Term>> {
    let scroll = select_one(doc.root_element(), &by_id(TERMS_TABLE_ID), "terms table")?;
    let body = only_child(scroll, "terms table")?;
    parse_terms(body)
}

// Parses the term selector of the class schedule page, where the rows sit
// one table deeper.
pub fn parse_schedule_terms_page(doc: &Html) -> Result<Vec<Term>> {
    let scroll = select_one(doc.root_element(), &by_id(TERMS_TABLE_ID), "terms table")?;

    let mut bodies = Vec::new();
    for child in child_elements(scroll) {
        bodies.extend(select_all(child, "tbody")?);
    }
    match bodies.as_slice() {
        [body] => parse_terms(*body),
        _ => Err(Error::structure("terms table", bodies.len())),
    }
}

fn parse_terms(body: ElementRef<'_>) -> Result<Vec<Term>> {
    parse_rows(body, parse_term_row).context("parsing terms table")
}

fn parse_term_row(row: ElementRef<'_>, id: &str) -> Result<Term> {
    let index = row_index(id)?;
    let scraper = IndexedScraper::new(row, index);

    Ok(Term {
        index,
        name: scraper.text("TERM_CAR", "term name")?,
        career: scraper.text("CAREER", "career info")?,
        institution: scraper.text("INSTITUTION", "institution name")?,
    })
}
