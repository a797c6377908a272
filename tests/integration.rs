use std::io::Write;
use std::path::PathBuf;

use funding_dashboard::config::{DataPaths, TopNSettings};
use funding_dashboard::data::loader::{AMOUNT, INVESTORS, VERTICAL};
use funding_dashboard::data::{Dataset, LoaderError};
use funding_dashboard::stats::{Aggregator, OTHERS_LABEL};
use funding_dashboard::view::{ChartKind, DashboardView, Mode, Panel, Session, ViewController};
use tempfile::TempDir;

const FUNDING_HEADER: &str = "Date,Startup,Vertical,SubVertical,City,Investors,Round,Amount,\
Startup Names,Industries,Funding Rounds,Investment Amount,Valuation,Number of Investors,\
Country,Year Founded,Growth Rate (%)\n";

/// One primary-table row; the second-schema columns are left empty.
fn funding_row(date: &str, startup: &str, vertical: &str, city: &str, investors: &str, amount: &str) -> String {
    format!("{date},{startup},{vertical},,{city},\"{investors}\",Seed,{amount},,,,,,,,,\n")
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{}", content).unwrap();
    path
}

fn fixture() -> (TempDir, DataPaths) {
    let mut funding = FUNDING_HEADER.to_string();
    funding.push_str(&funding_row("05/03/2017", "Alpha", "Tech", "Bengaluru", "Acme, Zeta", "5"));
    funding.push_str(&funding_row("12/08/2018", "Beta", "Tech", "Mumbai", "Acme", "undisclosed"));
    funding.push_str(&funding_row("21/01/2019", "Gamma", "Health", "Bengaluru", " Acme ,Kalaari Capital", "10"));
    funding.push_str(&funding_row("not-a-date", "Delta", "Food", "Delhi", "Acme Ventures", "7"));
    funding.push_str(&funding_row("01/01/2016", "Epsilon", "Food", "Pune", "Beacon", "3"));
    fixture_with(&funding)
}

/// Twelve Sequoia deals: six verticals, twelve startups and cities, one year
/// each from 2011 to 2022 written with two-digit years. Row `i` invests `10 * i`.
fn wide_fixture() -> (TempDir, DataPaths) {
    let mut funding = FUNDING_HEADER.to_string();
    for i in 1..=12 {
        funding.push_str(&funding_row(
            &format!("01/06/{:02}", 10 + i),
            &format!("S{i:02}"),
            &format!("V{}", (i - 1) % 6 + 1),
            &format!("City{i:02}"),
            &format!("Sequoia, Other{i:02}"),
            &(10 * i).to_string(),
        ));
    }
    fixture_with(&funding)
}

fn fixture_with(funding: &str) -> (TempDir, DataPaths) {
    let dir = TempDir::new().unwrap();

    let global = "Industry,Investment Amount (USD),Country,Year Founded,Startup Name\n\
Fintech,\"10,000,000\",USA,2012,Stripe\n\
Health,\"30,000,000\",USA,2012,Oscar\n";
    let india = "Startup Name,Industry Vertical,City  Location,Amount in USD\n\
Alpha,Tech,Bengaluru,\"1,000,000\"\n";

    let paths = DataPaths {
        funding: write(&dir, "cleaned_data.csv", funding),
        global: write(&dir, "global_data.csv", global),
        india: write(&dir, "startup_funding_india.csv", india),
    };
    (dir, paths)
}

#[test]
fn test_load_dataset_and_entities() {
    let (_dir, paths) = fixture();
    let dataset = Dataset::load(&paths).unwrap();

    assert_eq!(dataset.funding.height(), 5);
    assert_eq!(dataset.reference.height(), 3);
    assert_eq!(
        dataset.startups,
        vec!["Alpha", "Beta", "Delta", "Epsilon", "Gamma"]
    );
    // Sorted: Acme, Acme Ventures, Beacon, Kalaari Capital, Zeta; first two skipped.
    assert_eq!(dataset.investors, vec!["Beacon", "Kalaari Capital", "Zeta"]);
}

#[test]
fn test_missing_file_is_fatal() {
    let (_dir, mut paths) = fixture();
    paths.india = PathBuf::from("/nonexistent/india.csv");
    assert!(matches!(Dataset::load(&paths), Err(LoaderError::NotFound(_))));
}

#[test]
fn test_investor_vertical_sums_exclude_null_amounts() {
    let (_dir, paths) = fixture();
    let dataset = Dataset::load(&paths).unwrap();

    let rows = Aggregator::filter_rows_for_entity(&dataset.funding, INVESTORS, "Acme").unwrap();
    assert_eq!(rows.height(), 3);

    let sums = Aggregator::group_sum(&rows, VERTICAL, AMOUNT).unwrap();
    assert_eq!(
        sums.entries(),
        &[("Health".to_string(), 10.0), ("Tech".to_string(), 5.0)]
    );
}

#[test]
fn test_investor_view_end_to_end() {
    let (_dir, paths) = fixture();
    let dataset = Dataset::load(&paths).unwrap();
    let controller = ViewController::new(TopNSettings::default());

    let mut session = Session::new();
    session.select_mode(Mode::InvestorDetail);
    assert_eq!(controller.render(&dataset, &session), DashboardView::InvestorPrompt);

    session.confirm_investor("Acme");
    let DashboardView::Investor(view) = controller.render(&dataset, &session) else {
        panic!("expected investor view");
    };
    assert_eq!(view.matched_rows, 3);

    let recent = view.recent_investments.ready().unwrap();
    assert_eq!(recent.columns[0], "Date");
    let dates: Vec<&str> = recent.rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(dates, vec!["2019-01-21", "2018-08-12", "2017-03-05"]);

    let pie = view.vertical_distribution.ready().unwrap();
    assert_eq!(pie.kind, ChartKind::Pie);
    assert_eq!(
        pie.points,
        vec![("Health".to_string(), 10.0), ("Tech".to_string(), 5.0)]
    );

    let years = view.yearly_trend.ready().unwrap();
    assert_eq!(
        years.points,
        vec![("2017".to_string(), 5.0), ("2019".to_string(), 10.0)]
    );

    let cities = view.city_ranking.ready().unwrap();
    assert_eq!(cities.points, vec![("Bengaluru".to_string(), 15.0)]);

    let table = view.top_startups_table.ready().unwrap();
    assert_eq!(table.rows[0], vec!["Gamma", "10", "2019-01-21"]);

    assert_eq!(view.raw_rows.ready().unwrap().rows.len(), 3);
}

#[test]
fn test_selection_survives_mode_switch() {
    let (_dir, paths) = fixture();
    let dataset = Dataset::load(&paths).unwrap();
    let controller = ViewController::new(TopNSettings::default());

    let mut session = Session::new();
    session.confirm_investor("Zeta");
    session.request_overall();
    assert!(matches!(
        controller.render(&dataset, &session),
        DashboardView::Overall(_)
    ));

    session.select_mode(Mode::InvestorDetail);
    let DashboardView::Investor(view) = controller.render(&dataset, &session) else {
        panic!("expected investor view");
    };
    assert_eq!(view.investor, "Zeta");
    assert_eq!(view.matched_rows, 1);
}

#[test]
fn test_unknown_investor_renders_empty_states() {
    let (_dir, paths) = fixture();
    let dataset = Dataset::load(&paths).unwrap();
    let controller = ViewController::new(TopNSettings::default());

    let mut session = Session::new();
    session.confirm_investor("Nobody Capital");
    let DashboardView::Investor(view) = controller.render(&dataset, &session) else {
        panic!("expected investor view");
    };

    assert_eq!(view.matched_rows, 0);
    assert!(view.recent_investments.is_empty());
    assert!(view.vertical_distribution.is_empty());
    assert!(view.top_startups.is_empty());
    assert!(view.top_startups_table.is_empty());
    assert!(view.raw_rows.is_empty());
    assert!(view.city_ranking.is_empty());
    assert!(matches!(&view.yearly_trend, Panel::Empty(m) if m.contains("Nobody Capital")));
}

#[test]
fn test_startup_mode_is_not_wired() {
    let (_dir, paths) = fixture();
    let dataset = Dataset::load(&paths).unwrap();
    let controller = ViewController::new(TopNSettings::default());

    let mut session = Session::new();
    session.confirm_startup("Alpha");
    assert_eq!(
        controller.render(&dataset, &session),
        DashboardView::StartupPending {
            startup: Some("Alpha".to_string())
        }
    );
}

#[test]
fn test_overall_requires_request() {
    let (_dir, paths) = fixture();
    let dataset = Dataset::load(&paths).unwrap();
    let controller = ViewController::new(TopNSettings::default());

    let mut session = Session::new();
    assert_eq!(controller.render(&dataset, &session), DashboardView::OverallPrompt);

    session.request_overall();
    let DashboardView::Overall(view) = controller.render(&dataset, &session) else {
        panic!("expected overall view");
    };
    let field = view.headlines[0].metrics.ready().unwrap();
    assert_eq!(field[0].value, "Health");
    assert_eq!(field[1].value, "408.00 Cr");
}

#[test]
fn test_investor_view_caps_and_others_slice() {
    let (_dir, paths) = wide_fixture();
    let dataset = Dataset::load(&paths).unwrap();
    let controller = ViewController::new(TopNSettings::default());

    let mut session = Session::new();
    session.confirm_investor("Sequoia");
    let DashboardView::Investor(view) = controller.render(&dataset, &session) else {
        panic!("expected investor view");
    };
    assert_eq!(view.matched_rows, 12);

    // Vertical Vk collects rows k and k + 6: 20k + 60.
    let pie = view.vertical_distribution.ready().unwrap();
    assert_eq!(
        pie.points,
        vec![
            ("V6".to_string(), 180.0),
            ("V5".to_string(), 160.0),
            ("V4".to_string(), 140.0),
            ("V3".to_string(), 120.0),
            (OTHERS_LABEL.to_string(), 180.0),
        ]
    );

    let startups = view.top_startups.ready().unwrap();
    let names: Vec<&str> = startups.points.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["S12", "S11", "S10", "S09", "S08"]);

    let table = view.top_startups_table.ready().unwrap();
    assert_eq!(table.rows.len(), 5);
    assert_eq!(table.rows[0], vec!["S12", "120", "2022-06-01"]);

    let cities = view.city_ranking.ready().unwrap();
    assert_eq!(cities.points.len(), 10);
    assert_eq!(cities.points[0], ("City12".to_string(), 120.0));
    assert_eq!(cities.points[9], ("City03".to_string(), 30.0));

    let recent = view.recent_investments.ready().unwrap();
    assert_eq!(recent.rows.len(), 5);
    assert_eq!(recent.rows[0][0], "2022-06-01");

    // Two-digit years land in the 2000s, not year 11.
    let years = view.yearly_trend.ready().unwrap();
    assert_eq!(years.points.len(), 12);
    assert_eq!(years.points[0], ("2011".to_string(), 10.0));
    assert_eq!(years.points[11], ("2022".to_string(), 120.0));

    assert_eq!(view.raw_rows.ready().unwrap().rows.len(), 12);
}
