use log::info;
use scraper::{ElementRef, Html};

use crate::client::Client;
use crate::consts::{
    ACTION_FIELD, AJAX_FIELD, GRADES_ACTION, GRADES_TERM_FIELD, GRADES_URL, MAIN_GOTO_FIELD,
    MAIN_GOTO_VALUE, NAV_TYPE_FIELD,
};
use crate::error::{Result, ResultExt};
use crate::models::CourseGrade;
use crate::scrape::{by_id, hidden_fields, only_child, parse_rows, row_index, select_one, IndexedScraper};
use crate::transport::Transport;

impl<T: Transport> Client<T> {
    // Fetches the course grades for the term at `term_index` (see
    // Term::index).
    pub fn grades(&self, term_index: usize) -> Result<Vec<CourseGrade>> {
        let page = self.get_document(GRADES_URL, "fetching grades page")?;
        let fields = hidden_fields(&page).context("scraping hidden fields on grades page")?;

        let term = term_index.to_string();
        let form = fields.with([
            (AJAX_FIELD, "1"),
            (NAV_TYPE_FIELD, "0"),
            (ACTION_FIELD, GRADES_ACTION),
            (MAIN_GOTO_FIELD, MAIN_GOTO_VALUE),
            (GRADES_TERM_FIELD, term.as_str()),
        ]);
        let res = self.post_form(GRADES_URL, &form, "fetching grades")?;

        let doc = Html::parse_document(&res.body);
        let grades = parse_grades_page(&doc).with_context(|| format!("parsing grades for term {term_index}"))?;
        info!("Found {} course grades for term {term_index}", grades.len());
        Ok(grades)
    }
}

// Parses the grades grid returned after selecting a term.
pub fn parse_grades_page(doc: &Html) -> Result<Vec<CourseGrade>> {
    let grid = select_one(
        doc.root_element(),
        &format!("{} table.PSLEVEL1GRID", by_id("TERM_CLASSES$scroll$0")),
        "grades table",
    )?;
    let body = only_child(grid, "grades table body")?;
    parse_rows(body, parse_grade_row).context("parsing grades table")
}

fn parse_grade_row(row: ElementRef<'_>, id: &str) -> Result<CourseGrade> {
    let index = row_index(id)?;
    let scraper = IndexedScraper::new(row, index);

    Ok(CourseGrade {
        index,
        name: scraper.text("CLS_LINK$span", "course name")?,
        description: scraper.text("CLASS_TBL_VW_DESCR", "course description")?,
        units: scraper.optional_number("STDNT_ENRL_SSV1_UNT_TAKEN", "course units")?,
        grading_basis: scraper.text("GRADING_BASIS", "course grading basis")?,
        grade: scraper
            .optional_text("STDNT_ENRL_SSV1_CRSE_GRADE_OFF", "grade")?
            .unwrap_or_default(),
        grade_points: scraper.optional_number("STDNT_ENRL_SSV1_GRADE_POINTS", "grade points")?,
    })
}
