use log::{debug, info};
use scraper::{ElementRef, Html};

use crate::client::Client;
use crate::consts::{
    ACTION_FIELD, AJAX_FIELD, MAIN_GOTO_FIELD, MAIN_GOTO_VALUE, NAV_TYPE_FIELD, NBSP,
    SCHEDULES_ACTION, SCHEDULES_TERM_FIELD, SCHEDULES_URL,
};
use crate::error::{Error, Result, ResultExt};
use crate::models::{Class, CourseSchedule};
use crate::scrape::{
    by_id, hidden_fields, only_child, parse_rows, row_index, select_all, select_one, text,
    trailing_number, IndexedScraper,
};
use crate::transport::Transport;

impl<T: Transport> Client<T> {
    // Fetches the course schedules for the term at `term_index` (see
    // Client::terms_with_schedule).
    pub fn schedules(&self, term_index: usize) -> Result<Vec<CourseSchedule>> {
        let page = self.get_document(SCHEDULES_URL, "fetching course schedule page")?;
        let fields =
            hidden_fields(&page).context("scraping hidden fields on course schedule page")?;

        let term = term_index.to_string();
        let form = fields.with([
            (AJAX_FIELD, "1"),
            (NAV_TYPE_FIELD, "1"),
            (ACTION_FIELD, SCHEDULES_ACTION),
            (MAIN_GOTO_FIELD, MAIN_GOTO_VALUE),
            (SCHEDULES_TERM_FIELD, term.as_str()),
        ]);
        let res = self.post_form(SCHEDULES_URL, &form, "fetching course schedules")?;

        let doc = Html::parse_document(&res.body);
        let schedules = parse_schedules_page(&doc).context("parsing schedule")?;
        info!("Found {} course schedules for term {term_index}", schedules.len());
        Ok(schedules)
    }
}

// Parses every course table of a class schedule page.
//
// Class indices keep counting across course tables, so the first class of
// the second course follows the last class of the first.
pub fn parse_schedules_page(doc: &Html) -> Result<Vec<CourseSchedule>> {
    let container = select_one(
        doc.root_element(),
        &by_id("ACE_STDNT_ENRL_SSV2$0"),
        "schedule container table",
    )?;
    let container = only_child(container, "schedule container table")?;

    let tables = select_all(container, "table.PSGROUPBOXWBO")?;
    if tables.is_empty() {
        return Err(Error::Missing {
            what: "schedule tables".to_string(),
        });
    }

    let (schedules, _) = tables
        .into_iter()
        .enumerate()
        .try_fold((Vec::new(), 0), |(mut schedules, offset), (i, table)| {
            let cs = parse_schedule_table(table, offset).with_context(|| format!("table {i}"))?;
            let offset = offset + cs.classes.len();
            schedules.push(cs);
            Ok::<_, Error>((schedules, offset))
        })
        .context("parsing schedules table")?;
    Ok(schedules)
}

fn parse_schedule_table(table: ElementRef<'_>, class_offset: usize) -> Result<CourseSchedule> {
    let inner = select_one(table, "table.PSGROUPBOX", "inner table")?;
    let id = inner.value().attr("id").ok_or_else(|| Error::MissingAttribute {
        what: "inner table".to_string(),
        attr: "id",
    })?;
    let index = trailing_number(id).ok_or_else(|| Error::MalformedId { id: id.to_string() })?;

    let name = text(select_one(table, "td.PAGROUPDIVIDER", "course name")?);

    let header = select_one(
        table,
        &by_id(&format!("trSSR_DUMMY_RECVW${index}_row1")),
        "header info row",
    )?;
    let scraper = IndexedScraper::new(header, index);
    let status = scraper.text("STATUS", "course status")?;
    let units = scraper.number("DERIVED_REGFRM1_UNT_TAKEN", "units taken")?;
    let grading_basis = scraper.text("GB_DESCR", "grading basis")?;

    let grid = select_one(
        table,
        &format!("{} table.PSLEVEL3GRID", by_id(&format!("CLASS_MTG_VW$scroll${index}"))),
        "classes table",
    )?;
    let body = only_child(grid, "classes table body")?;
    let classes = parse_rows(body, |row, id| {
        parse_class_row(row, id, class_offset)
            .with_context(|| format!("class offset {class_offset}"))
    })
    .context("parsing classes table")?;
    debug!("Parsed {} classes for {name}", classes.len());

    Ok(CourseSchedule {
        index,
        name,
        status,
        units,
        grading_basis,
        classes,
    })
}

fn parse_class_row(row: ElementRef<'_>, id: &str, offset: usize) -> Result<Class> {
    let index = row_index(id)? + offset;
    let scraper = IndexedScraper::new(row, index);

    Ok(Class {
        index,
        number: scraper.number("DERIVED_CLS_DTL_CLASS_NBR", "class number")?,
        section: scraper.number("MTG_SECTION", "class section")?,
        component: scraper.text("MTG_COMP", "course component")?,
        schedule: scraper.optional_text("MTG_SCHED", "class schedule")?,
        location: scraper.text("MTG_LOC", "class location")?.replace(NBSP, ""),
        instructor: scraper.text("DERIVED_CLS_DTL_SSR_INSTR_LONG", "instructor")?,
        start_end_date: scraper.text("MTG_DATES", "'Start/End Date'")?,
    })
}
