//! In-memory specification map example.
//!
//! Extracts tagged test descriptions from a source string, reconciles them
//! with a requirement table and prints both the console and markdown
//! renderings, without touching the filesystem.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p spec-map-scan --example map_source
//! ```

use spec_map_scan::aggregate::aggregate;
use spec_map_scan::extract::DescriptionExtractor;
use spec_map_scan::output::{OutputFormat, format_report};
use spec_map_scan::report::Report;
use spec_map_scan::requirements::parse_requirements;
use spec_map_scan::tag::TagMode;

fn main() {
    let source = r#"
void main() {
  patrolTest('checkout: user can pay', ($) async {});
  patrolTest('login: user can sign in', ($) async {});
  patrolTest('search: results are listed', ($) async {});
  patrolTest('app starts without crashing', ($) async {});
}
"#;

    let table = r#"
| Tag      | Description               |
|----------|---------------------------|
| login    | Users can sign in         |
| checkout | Users must be able to pay |
| refunds  | Users can request refunds |
"#;

    let cases: Vec<_> = DescriptionExtractor::default()
        .extract(source, "integration_test/app_test.dart")
        .collect();
    println!("Found {} test descriptions", cases.len());

    let set = match aggregate(&cases, TagMode::Prefix) {
        Ok(set) => set,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    let report = Report::reconcile(&set, &parse_requirements(table));

    println!(
        "{} requirement(s), {} uncovered, {} orphan tag(s)\n",
        report.summary.requirements,
        report.summary.uncovered_requirements,
        report.summary.orphan_tags
    );

    for format in [OutputFormat::Text, OutputFormat::Markdown] {
        match format_report(&report, format) {
            Ok(rendered) => println!("--- {format:?} ---\n{rendered}"),
            Err(err) => eprintln!("error: {err}"),
        }
    }
}
