//! Section header component with title and optional caption.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    /// Section title
    pub title: String,
    /// Caption under the title (e.g. what the bars measure)
    #[props(default = String::new())]
    pub caption: String,
}

/// Header for the chart and map sections.
#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{props.title}"
            }
            if !props.caption.is_empty() {
                p {
                    style: "margin: 0; font-size: 12px; color: #666;",
                    "{props.caption}"
                }
            }
        }
    }
}
