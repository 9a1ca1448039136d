use sift::query::{
    apply_filter, page_window, paginate, predicate, total_pages, PageMarker, PageSize, QueryEngine,
    QueryIntent, QueryState, SortDirection, SortIndicator,
};
use sift::store::{ListEvent, ListStore};
use sift::Result;

#[derive(Debug, Clone, PartialEq)]
struct Job {
    title: &'static str,
    company: &'static str,
    skills: Vec<&'static str>,
    salary: u32,
}

fn job(title: &'static str, company: &'static str, skills: &[&'static str], salary: u32) -> Job {
    Job {
        title,
        company,
        skills: skills.to_vec(),
        salary,
    }
}

fn jobs() -> Vec<Job> {
    vec![
        job("Senior Rust Engineer", "Ferrous Systems", &["rust", "tokio"], 180),
        job("Frontend Developer", "Pixel Labs", &["react", "typescript"], 120),
        job("Data Engineer", "Riverbank", &["python", "spark"], 150),
        job("Platform Engineer", "Oxide", &["rust", "illumos"], 175),
        job("Product Designer", "Pixel Labs", &["figma"], 110),
        job("Backend Developer", "Rusty Bolts", &["go", "postgres"], 140),
        job("Mobile Developer", "Appcraft", &["kotlin", "swift"], 130),
    ]
}

fn job_engine(page_size: usize) -> Result<QueryEngine<Job>> {
    QueryEngine::builder()
        .predicate(predicate::any_of(|j: &Job| {
            let mut fields = vec![j.title.to_string(), j.company.to_string()];
            fields.extend(j.skills.iter().map(|s| (*s).to_string()));
            fields
        }))
        .sort_option("title", "Title", |a: &Job, b: &Job| a.title.cmp(b.title))
        .sort_option("salary", "Salary", |a: &Job, b: &Job| a.salary.cmp(&b.salary))
        .page_size(PageSize::new(page_size)?)
        .build()
}

#[test]
fn search_spans_title_company_and_skills() -> Result<()> {
    let data = jobs();
    let engine = job_engine(10)?;
    let query = QueryIntent::SetQuery("rust".into());
    let state = engine.recompute(&data, &QueryState::default(), &query)?;
    let view = engine.view(&data, &state);

    let titles: Vec<_> = view.items.iter().map(|j| j.title).collect();
    assert_eq!(
        titles,
        vec!["Senior Rust Engineer", "Platform Engineer", "Backend Developer"]
    );
    assert_eq!(view.summary, "Showing 3 of 3 items");
    Ok(())
}

#[test]
fn filter_is_always_an_ordered_subsequence() {
    let data = jobs();
    let pred = predicate::contains(|j: &Job| j.title.to_string());
    for query in ["", "e", "engineer", "dev", "zzz", "R"] {
        let out = apply_filter(&data, Some(&*pred), query);
        let positions: Vec<usize> = out
            .iter()
            .map(|item| data.iter().position(|d| std::ptr::eq(d, *item)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "query {query:?}");
    }
}

#[test]
fn sort_cycle_returns_to_filtered_order() -> Result<()> {
    let data = jobs();
    let engine = job_engine(100)?;
    let query = QueryIntent::SetQuery("engineer".into());
    let filtered = engine.recompute(&data, &QueryState::default(), &query)?;
    let baseline = engine.view(&data, &filtered).items;

    let asc = engine.recompute(&data, &filtered, &QueryIntent::ToggleSort("salary".into()))?;
    let salaries: Vec<u32> = engine.view(&data, &asc).items.iter().map(|j| j.salary).collect();
    assert_eq!(salaries, vec![150, 175, 180]);

    let desc = engine.recompute(&data, &asc, &QueryIntent::ToggleSort("salary".into()))?;
    assert_eq!(desc.sort.direction, SortDirection::Descending);
    let salaries: Vec<u32> = engine.view(&data, &desc).items.iter().map(|j| j.salary).collect();
    assert_eq!(salaries, vec![180, 175, 150]);

    let none = engine.recompute(&data, &desc, &QueryIntent::ToggleSort("salary".into()))?;
    assert_eq!(engine.view(&data, &none).items, baseline);
    assert!(engine
        .view(&data, &none)
        .columns
        .iter()
        .all(|c| c.indicator == SortIndicator::None));
    Ok(())
}

#[test]
fn pagination_partitions_every_page_size() {
    let data: Vec<u32> = (0..37).collect();
    for size in 1..=12 {
        let page_size = PageSize::new(size).unwrap();
        let pages = total_pages(data.len(), page_size);
        let rebuilt: Vec<u32> = (1..=pages)
            .flat_map(|page| paginate(&data, page, page_size).iter().copied())
            .collect();
        assert_eq!(rebuilt, data, "page size {size}");
    }
}

#[test]
fn twenty_page_window_centres_on_current() {
    assert_eq!(
        page_window(10, 20, 1),
        vec![
            PageMarker::Page(1),
            PageMarker::Ellipsis,
            PageMarker::Page(9),
            PageMarker::Page(10),
            PageMarker::Page(11),
            PageMarker::Ellipsis,
            PageMarker::Page(20),
        ]
    );
}

#[test]
fn page_window_always_bookends_first_and_last() {
    for total in 2..40 {
        for current in 1..=total {
            let window = page_window(current, total, 1);
            assert_eq!(window.first(), Some(&PageMarker::Page(1)));
            assert_eq!(window.last(), Some(&PageMarker::Page(total)));
            assert!(!window
                .windows(2)
                .any(|w| w[0] == PageMarker::Ellipsis && w[1] == PageMarker::Ellipsis));
        }
    }
}

#[test]
fn store_walks_pages_and_survives_deletion() -> Result<()> {
    let mut store = ListStore::new(job_engine(3)?, jobs()).with_default_sort("title")?;

    let first: Vec<_> = store.view().items.iter().map(|j| j.title).collect();
    assert_eq!(first, vec!["Backend Developer", "Data Engineer", "Frontend Developer"]);

    store.dispatch(&QueryIntent::LastPage)?;
    let view = store.view();
    assert_eq!(view.current_page, 3);
    assert_eq!(view.items.len(), 1);
    assert!(!view.pager.nav.can_next);
    assert!(view.pager.nav.can_previous);

    let events = store.retain(|j| j.company != "Pixel Labs");
    assert_eq!(events, vec![ListEvent::DatasetChanged(5), ListEvent::PageChanged(2)]);
    assert_eq!(store.view().total_pages, 2);
    Ok(())
}

#[test]
fn out_of_range_page_request_clamps_instead_of_failing() -> Result<()> {
    let data = jobs();
    let engine = job_engine(3)?;
    let state = QueryState {
        page: 50,
        ..QueryState::default()
    };
    let view = engine.view(&data, &state);
    assert_eq!(view.current_page, 3);
    assert_eq!(view.items.len(), 1);
    Ok(())
}
