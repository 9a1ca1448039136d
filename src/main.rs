//! Demo host: query a JSON dataset from the command line.
//!
//! The binary is a thin shell over the library. It loads a JSON array of
//! objects, registers a sort option per top-level key of the first object,
//! filters on every string field, replays the intents given as arguments
//! through a [`ListStore`], and prints the resulting page.
//!
//! # Usage
//!
//! ```text
//! sift [--config sift.toml] <dataset.json> [intent...]
//!
//! intents:
//!   query=<text>    filter on any string field
//!   sort=<key>      advance the sort cycle for <key> (repeat to go descending)
//!   page=<n>        jump to page n
//!   first | prev | next | last
//!   clear           reset query, sort, and page
//! ```
//!
//! Log output goes to stderr and follows `RUST_LOG` or the config's
//! `trace_level`.

#![allow(clippy::multiple_crate_versions)]

use serde_json::Value;
use sift::query::{predicate, QueryIntent};
use sift::store::ListStore;
use sift::ui::render_page;
use sift::{Config, Result, SiftError};
use std::cmp::Ordering;
use std::path::PathBuf;
use std::process::ExitCode;

struct Args {
    config: Option<PathBuf>,
    dataset: PathBuf,
    intents: Vec<QueryIntent>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut config = None;
    let mut dataset = None;
    let mut intents = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args
                .next()
                .ok_or_else(|| SiftError::Config("--config requires a path".to_string()))?;
            config = Some(PathBuf::from(path));
        } else if dataset.is_none() {
            dataset = Some(PathBuf::from(arg));
        } else {
            intents.push(parse_intent(&arg)?);
        }
    }

    let dataset = dataset.ok_or_else(|| SiftError::Config("missing dataset path".to_string()))?;
    Ok(Args {
        config,
        dataset,
        intents,
    })
}

fn parse_intent(arg: &str) -> Result<QueryIntent> {
    let intent = match arg.split_once('=') {
        Some(("query", text)) => QueryIntent::SetQuery(text.to_string()),
        Some(("sort", key)) => QueryIntent::ToggleSort(key.to_string()),
        Some(("page", n)) => QueryIntent::GoToPage(
            n.parse()
                .map_err(|_| SiftError::Config(format!("page must be a number, got '{n}'")))?,
        ),
        None if arg == "first" => QueryIntent::FirstPage,
        None if arg == "prev" => QueryIntent::PreviousPage,
        None if arg == "next" => QueryIntent::NextPage,
        None if arg == "last" => QueryIntent::LastPage,
        None if arg == "clear" => QueryIntent::ClearAll,
        _ => return Err(SiftError::Config(format!("unrecognized intent '{arg}'"))),
    };
    Ok(intent)
}

/// Orders numbers numerically, strings case-insensitively, and everything
/// else by its JSON text. Missing fields sort first.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn format_row(item: &Value, keys: &[String]) -> String {
    keys.iter()
        .map(|key| match item.get(key) {
            Some(Value::String(s)) => sift::ui::helpers::truncate(s, 24),
            Some(other) => other.to_string(),
            None => "-".to_string(),
        })
        .map(|cell| format!("{cell:<24}"))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

fn run(args: Args) -> Result<String> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    sift::observability::init_tracing(&config);

    let _span = tracing::debug_span!("demo_run", dataset = %args.dataset.display()).entered();

    let contents = std::fs::read_to_string(&args.dataset)?;
    let items: Vec<Value> = serde_json::from_str(&contents)?;
    let keys: Vec<String> = items
        .first()
        .and_then(Value::as_object)
        .map(|object| object.keys().cloned().collect())
        .unwrap_or_default();
    tracing::debug!(items = items.len(), columns = keys.len(), "dataset loaded");

    let string_fields = predicate::any_of(|item: &Value| {
        item.as_object()
            .map(|object| {
                object
                    .values()
                    .filter_map(|value| value.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    });
    let mut builder = sift::initialize(&config)
        .query_builder::<Value>()
        .predicate(string_fields);
    for key in &keys {
        let field = key.clone();
        builder = builder.sort_option(key.clone(), key.clone(), move |a: &Value, b: &Value| {
            compare_field(a.get(&field), b.get(&field))
        });
    }

    let mut store = ListStore::new(builder.build()?, items);
    for intent in &args.intents {
        let (_, events) = store.dispatch(intent)?;
        tracing::debug!(intent = ?intent, events = ?events, "intent applied");
    }

    let view = store.view();
    Ok(render_page(&view, |item| format_row(item, &keys)))
}

fn main() -> ExitCode {
    let outcome = parse_args(std::env::args().skip(1)).and_then(run);
    match outcome {
        Ok(page) => {
            print!("{page}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "sift failed");
            eprintln!("sift: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{compare_field, format_row, parse_args, parse_intent};
    use serde_json::json;
    use sift::query::QueryIntent;
    use std::cmp::Ordering;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn parses_config_dataset_and_intents() {
        let parsed = parse_args(args(&[
            "--config",
            "s.toml",
            "jobs.json",
            "query=rust",
            "sort=title",
            "next",
        ]))
        .unwrap();
        assert_eq!(parsed.config.unwrap().to_str(), Some("s.toml"));
        assert_eq!(parsed.dataset.to_str(), Some("jobs.json"));
        assert_eq!(
            parsed.intents,
            vec![
                QueryIntent::SetQuery("rust".into()),
                QueryIntent::ToggleSort("title".into()),
                QueryIntent::NextPage
            ]
        );
    }

    #[test]
    fn rejects_unknown_intents() {
        assert!(parse_intent("jump").is_err());
        assert!(parse_intent("page=two").is_err());
        assert!(parse_args(args(&[])).is_err());
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(compare_field(Some(&json!(9)), Some(&json!(10))), Ordering::Less);
        assert_eq!(compare_field(Some(&json!("b")), Some(&json!("A"))), Ordering::Greater);
        assert_eq!(compare_field(None, Some(&json!(1))), Ordering::Less);
    }

    #[test]
    fn rows_render_missing_fields_as_dash() {
        let keys = vec!["title".to_string(), "salary".to_string()];
        let row = format_row(&json!({"title": "Rust Engineer"}), &keys);
        assert!(row.starts_with("Rust Engineer"));
        assert!(row.ends_with('-'));
    }
}
