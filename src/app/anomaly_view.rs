use leptos::prelude::*;
use leptos::task::spawn_local;
use models::{
    error_text, AnomalyRecord, Liveness, ViewContent, ViewState, HEADING_TEXT, LOADING_TEXT,
    NO_ANOMALIES_TEXT,
};
use shared_constants::ANOMALIES_URL;
use thaw::{Layout, Text};

use super::fetch::fetch_anomalies;

/// Component that renders one anomaly as a list line
#[component]
fn AnomalyLine(anomaly: AnomalyRecord) -> impl IntoView {
    let key = anomaly.list_key();
    let tail = anomaly.line_tail();
    view! {
        <li data-key=key>
            <strong>{anomaly.direction}</strong>
            " at site "
            <em>{anomaly.site_name}</em>
            {tail}
        </li>
    }
}

/// Component that renders the heading and the anomalies in received order
#[component]
fn AnomalyList(anomalies: Vec<AnomalyRecord>) -> impl IntoView {
    let is_empty = anomalies.is_empty();
    view! {
        <h1>{HEADING_TEXT}</h1>
        {is_empty.then(|| view! { <p>{NO_ANOMALIES_TEXT}</p> })}
        <ul>
            {anomalies
                .into_iter()
                .map(|anomaly| view! { <AnomalyLine anomaly /> })
                .collect::<Vec<_>>()}
        </ul>
    }
}

/// Component that fetches the anomalies once when mounted and shows them
#[component]
pub fn AnomalyView() -> impl IntoView {
    let state = RwSignal::new(ViewState::default());
    let liveness = Liveness::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || liveness.revoke()
    });

    spawn_local(async move {
        let outcome = fetch_anomalies(ANOMALIES_URL).await;
        let applied = liveness
            .run_if_alive(move || state.try_update(move |view_state| view_state.complete(outcome)))
            .flatten();
        if applied.is_none() {
            log::debug!("AnomalyView gone before the fetch completed, dropping result");
        }
    });

    view! {
        <Layout attr:style="padding: 20px;">
            {move || {
                state
                    .with(|state| match state.content() {
                        ViewContent::Loading => view! { <Text>{LOADING_TEXT}</Text> }.into_any(),
                        ViewContent::Failed(message) => {
                            let text = error_text(message);
                            view! { <Text>{text}</Text> }.into_any()
                        }
                        ViewContent::Loaded(anomalies) => {
                            view! { <AnomalyList anomalies=anomalies.to_vec() /> }.into_any()
                        }
                    })
            }}
        </Layout>
    }
}
