use indoc::indoc;
use pretty_assertions::assert_eq;
use roehn_config::AppConfig as _;
use roehn_page::{AlertContent, Config, Error, Page, Severity};
use std::{sync::Arc, time::Duration};
use url::Url;

const AREAS_PAGE: &str = indoc! {r#"
    <!DOCTYPE html>
    <html lang="pt-BR">
      <head><title>Áreas</title></head>
      <body>
        <nav class="navbar navbar-expand-lg">
          <ul class="navbar-nav">
            <li class="nav-item"><a class="nav-link" href="/">Projetos</a></li>
            <li class="nav-item"><a class="nav-link" href="/areas">Áreas</a></li>
            <li class="nav-item"><a class="nav-link" href="/ambientes">Ambientes</a></li>
            <li class="nav-item"><a class="nav-link" href="/circuitos">Circuitos</a></li>
          </ul>
        </nav>
        <div class="container mt-4">
          <table class="table"></table>
        </div>
      </body>
    </html>
"#};

fn load(html: &str, url: &str) -> Page {
    roehn_logging::testing::init();
    let mut page = Page::parse(
        html,
        Url::parse(url).unwrap(),
        Arc::new(Config::test_config().unwrap()),
    );
    page.content_loaded().unwrap();
    page
}

fn active_links(page: &Page) -> Vec<String> {
    page.document()
        .select(".nav-link.active")
        .unwrap()
        .map(|link| link.text_contents())
        .collect()
}

fn container_classes(page: &Page) -> Vec<String> {
    let container = page.document().select_first(".container").unwrap();
    container
        .as_node()
        .children()
        .filter_map(|child| {
            child
                .as_element()
                .and_then(|element| element.attributes.borrow().get("class").map(String::from))
        })
        .collect()
}

#[test]
fn loading_a_page_marks_its_menu_entry() {
    let page = load(AREAS_PAGE, "http://localhost:5000/areas");
    assert_eq!(active_links(&page), vec!["Áreas"]);
}

#[test]
fn pages_outside_the_menu_mark_nothing() {
    let page = load(AREAS_PAGE, "http://localhost:5000/projeto/3");
    assert!(active_links(&page).is_empty());
    assert!(!page.to_html().contains("active"));
}

#[test]
fn flash_style_alert_shows_and_expires() {
    let mut page = load(AREAS_PAGE, "http://localhost:5000/areas");

    let alert = page
        .show_alert("Área criada com sucesso", Severity::Success)
        .unwrap();
    assert_eq!(
        container_classes(&page),
        vec!["alert alert-success alert-dismissible fade show", "table"]
    );
    assert!(alert.banner().text_contents().contains("Área criada com sucesso"));

    assert_eq!(page.advance(Duration::from_millis(4000)), 0);
    assert!(alert.is_attached());

    assert_eq!(page.advance(Duration::from_millis(1000)), 1);
    assert_eq!(container_classes(&page), vec!["table"]);
}

#[test]
fn alerts_of_different_severities_stack() {
    let mut page = load(AREAS_PAGE, "http://localhost:5000/areas");

    page.show_alert("Projeto não encontrado.", Severity::Danger)
        .unwrap();
    page.timers_mut().advance(Duration::from_millis(2500));
    page.show_alert(
        AlertContent::markup("Selecione ou crie um <b>projeto</b>"),
        Severity::Warning,
    )
    .unwrap();

    assert_eq!(
        container_classes(&page),
        vec![
            "alert alert-warning alert-dismissible fade show",
            "alert alert-danger alert-dismissible fade show",
            "table",
        ]
    );

    // the danger alert expires first
    assert_eq!(page.advance(Duration::from_millis(2500)), 1);
    assert_eq!(
        container_classes(&page),
        vec!["alert alert-warning alert-dismissible fade show", "table"]
    );

    assert_eq!(page.advance(Duration::from_millis(2500)), 1);
    assert_eq!(container_classes(&page), vec!["table"]);
}

#[test]
fn dismissed_alert_then_timer() {
    let mut page = load(AREAS_PAGE, "http://localhost:5000/areas");

    let alert = page.show_alert("Salvo", Severity::Info).unwrap();
    let close = alert.banner().select_first(".btn-close").unwrap();
    assert!(roehn_page::alert::dismiss(close.as_node()));

    let before = page.to_html();
    assert_eq!(page.advance(Duration::from_millis(5000)), 1);
    assert_eq!(page.to_html(), before);
}

#[test]
fn page_without_container() {
    let mut page = load(
        r#"<nav><a class="nav-link" href="/login">Entrar</a></nav>"#,
        "http://localhost:5000/login",
    );
    assert_eq!(active_links(&page), vec!["Entrar"]);

    let err = page.show_alert("Salvo", Severity::Success).unwrap_err();
    assert!(matches!(err, Error::ContainerNotFound { .. }));
    assert!(page.timers().is_empty());
}
