use leptos::prelude::*;
use thaw::{ConfigProvider, Layout, Theme};

use super::anomaly_view::AnomalyView;

/// The main app component
#[component]
pub fn Main() -> impl IntoView {
    let theme = RwSignal::new(Theme::dark());
    let set_body_background_color = move |color: &String| {
        if let Some(document) = window().document() {
            if let Some(body) = document.body() {
                let _ = body
                    .style()
                    .set_property("background-color", color.as_str());
            }
        }
    };
    Effect::new(move |_| {
        set_body_background_color(theme.get().color.color_neutral_background_1());
    });
    view! {
        <ConfigProvider theme>
            <Layout class="outer-layout">
                <AnomalyView />
            </Layout>
        </ConfigProvider>
    }
}
