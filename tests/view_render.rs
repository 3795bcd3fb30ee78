use mtwatch::models::Account;
use mtwatch::view::render::{render_view, render_view_bar, RenderOptions, EMPTY_PLACEHOLDER};
use mtwatch::view::{Selection, ViewMode};

fn account(login: &str, name: Option<&str>) -> Account {
    Account {
        id: login.to_string(),
        login: login.to_string(),
        name: name.map(str::to_string),
        server: "Demo-01".to_string(),
        balance: 1000.0,
        equity: 1050.0,
        profit: 50.0,
        free_margin: 900.0,
        margin: 150.0,
        margin_level: 700.0,
        last_updated: 1704067200,
        active_eas: Vec::new(),
    }
}

fn selection_of(id: &str) -> Selection {
    let mut selection = Selection::default();
    selection.select(id);
    selection
}

#[test]
fn grid_shows_formatted_metrics() {
    let accounts = vec![account("100", Some("Main Account"))];
    let out = render_view(
        ViewMode::Grid,
        &accounts,
        &Selection::default(),
        &RenderOptions::default(),
    );

    assert!(out.contains("Main Account"));
    assert!(out.contains("$1,000.00"));
    assert!(out.contains("$1,050.00"));
    assert!(out.contains("+$50.00"));
    assert!(out.contains("$900.00"));
    assert!(out.contains("700.00%"));
}

#[test]
fn every_mode_renders_placeholder_when_empty() {
    let options = RenderOptions::default();
    for mode in ViewMode::ALL {
        let out = render_view(mode, &[], &Selection::default(), &options);
        assert_eq!(out, EMPTY_PLACEHOLDER, "mode {}", mode.as_str());
    }
}

#[test]
fn tabs_detail_follows_selection() {
    let accounts = vec![account("100", Some("Main Account")), account("200", Some("Hedge"))];
    let options = RenderOptions::default();

    let first = render_view(ViewMode::Tabs, &accounts, &selection_of("100"), &options);
    assert!(first.contains("[Main Account]"));
    assert!(first.contains("Login: 100"));

    let second = render_view(ViewMode::Tabs, &accounts, &selection_of("200"), &options);
    assert!(second.contains("[Hedge]"));
    assert!(second.contains("Login: 200"));
    assert!(!second.contains("Login: 100"));
}

#[test]
fn dropdown_marks_selected_row() {
    let accounts = vec![account("100", Some("Main Account")), account("200", Some("Hedge"))];
    let out = render_view(
        ViewMode::Dropdown,
        &accounts,
        &selection_of("200"),
        &RenderOptions::default(),
    );

    assert!(out.contains("> Hedge (login 200)"));
    assert!(out.contains("  Main Account (login 100)"));
    assert!(out.contains("Login: 200"));
}

#[test]
fn table_lists_every_account_under_a_header() {
    let accounts = vec![account("100", Some("Main Account")), account("200", None)];
    let out = render_view(
        ViewMode::Table,
        &accounts,
        &Selection::default(),
        &RenderOptions::default(),
    );
    let lines: Vec<&str> = out.lines().collect();

    assert!(lines[0].contains("Login"));
    assert!(lines[0].contains("Margin Lvl"));
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("100"));
    assert!(lines[2].contains("Account 200"));
}

#[test]
fn display_name_falls_back_through_the_chain() {
    let named = account("100", Some("Main Account"));
    let mut single_ea = account("200", None);
    single_ea.active_eas = vec!["Scalper".to_string()];
    let mut many_eas = account("300", None);
    many_eas.active_eas = vec!["Scalper".to_string(), "Trend".to_string()];
    let bare = account("400", None);

    let options = RenderOptions::default();
    let accounts = vec![named, single_ea, many_eas, bare];
    let out = render_view(ViewMode::Grid, &accounts, &Selection::default(), &options);

    assert!(out.contains("Main Account"));
    assert!(out.contains("Scalper  (login 200"));
    assert!(out.contains("2 EAs  (login 300"));
    assert!(out.contains("Account 400  (login 400"));
}

#[test]
fn currency_symbol_comes_from_options() {
    let accounts = vec![account("100", None)];
    let options = RenderOptions {
        currency_symbol: "€".to_string(),
    };
    let out = render_view(ViewMode::Grid, &accounts, &Selection::default(), &options);
    assert!(out.contains("€1,000.00"));
    assert!(!out.contains('$'));
}

#[test]
fn view_bar_brackets_exactly_one_mode() {
    for mode in ViewMode::ALL {
        let bar = render_view_bar(mode);
        assert_eq!(bar.matches('[').count(), 1, "bar: {bar}");
        assert!(bar.contains(&format!("[{}]", mode.label())));
        for other in ViewMode::ALL {
            assert!(bar.contains(other.label()));
        }
    }
}

#[test]
fn detail_panel_lists_ea_badges() {
    let mut acct = account("100", Some("Main Account"));
    acct.active_eas = vec!["Scalper".to_string(), "Trend".to_string()];
    let accounts = vec![acct];
    let out = render_view(
        ViewMode::Tabs,
        &accounts,
        &selection_of("100"),
        &RenderOptions::default(),
    );
    assert!(out.contains("EAs: Scalper, Trend"));
    assert!(out.contains("Margin Used:  $150.00"));
    assert!(out.contains("Last updated: Jan 01, 00:00"));
}
