mod navbar;
mod rules_tooltip;
mod sentence_view;

use dioxus::prelude::*;
use dioxus_logger::tracing::{error, info};

use self::{navbar::Navbar, rules_tooltip::RulesTooltip, sentence_view::SentenceView};
use ruleviz_core::{AnalysisSheet, InlineStyles, SheetIssue, Viewer, include_test_file};

fn demo_sheet() -> AnalysisSheet {
    AnalysisSheet::load(include_test_file!("demo-sheet.json")).unwrap_or_else(|err| {
        error!("bundled sheet is broken: {err}");
        AnalysisSheet::default()
    })
}

#[component]
#[allow(non_snake_case)]
pub fn App() -> Element {
    let sheet: Signal<AnalysisSheet> = use_signal(demo_sheet);
    let mut viewer: Signal<Viewer> = use_signal(Viewer::default);
    let mut styles: Signal<InlineStyles> = use_signal(InlineStyles::default);

    // rebuild the span index and drop stale highlights whenever a new sheet
    // is loaded
    use_effect(move || {
        let sheet = sheet.read();
        info!("Indexing {} sentences", sheet.sentences.len());
        viewer.set(Viewer::from_sheet(&sheet));
        styles.set(InlineStyles::default());
    });

    let issues: Memo<Vec<SheetIssue>> = use_memo(move || sheet.read().validate());

    rsx! {
        document::Stylesheet { href: asset!("/assets/main.css") }

        Navbar { sheet, issues }
        if !issues.read().is_empty() {
            ul { class: "issues",
                for issue in issues.read().iter() {
                    li { "{issue}" }
                }
            }
        }
        div { class: "sheet",
            for sentence in sheet.read().sentences.iter() {
                SentenceView {
                    key: "{sentence.id}",
                    sentence: sentence.clone(),
                    viewer,
                    styles,
                }
            }
        }
        RulesTooltip { styles }
    }
}
