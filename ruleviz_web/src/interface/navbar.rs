use dioxus::prelude::*;
use dioxus_logger::tracing::{error, info};
use ruleviz_core::{AnalysisSheet, SheetIssue};

use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdCircleCheck, LdCircleX, LdFileUp};

#[component]
#[allow(non_snake_case)]
pub fn Navbar(sheet: Signal<AnalysisSheet>, issues: Memo<Vec<SheetIssue>>) -> Element {
    let sentence_count = sheet.read().sentences.len();
    let issue_count = issues.read().len();

    rsx! {
        nav { class: "navbar",
            span { class: "title", "Analysis Sheet" }
            div { class: "status",
                if issue_count == 0 {
                    Icon { width: 15, icon: LdCircleCheck }
                    "{sentence_count} sentences"
                } else {
                    Icon { width: 15, icon: LdCircleX }
                    "{sentence_count} sentences, {issue_count} issues"
                }
            }
            label {
                Icon { width: 15, icon: LdFileUp }
                "Open sheet"
                input {
                    r#type: "file",
                    accept: ".json",
                    onchange: move |evt: FormEvent| async move {
                        let Some(engine) = evt.files() else {
                            return;
                        };
                        for name in engine.files() {
                            let Some(json) = engine.read_file_to_string(&name).await else {
                                error!("could not read {name}");
                                continue;
                            };
                            match AnalysisSheet::load(&json) {
                                Ok(loaded) => {
                                    info!("Loaded {name}");
                                    sheet.set(loaded);
                                }
                                // keep showing the previous sheet
                                Err(err) => error!("failed to load {name}: {err}"),
                            }
                        }
                    },
                }
            }
        }
    }
}
