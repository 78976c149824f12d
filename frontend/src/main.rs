use yew::prelude::*;

mod components;
mod hooks;
mod services;
mod state;

use components::AvailabilityCalendar;
use services::api::ApiClient;

#[derive(Properties, PartialEq)]
struct AppProps {
    person_id: String,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let api_client = ApiClient::new(props.person_id.clone());

    html! {
        <AvailabilityCalendar {api_client} />
    }
}

fn main() {
    // Only run on pages that carry the widget container.
    let Some(root) = gloo::utils::document().get_element_by_id("availability-calendar") else {
        return;
    };

    // The person being edited is explicit configuration on the container.
    let Some(person_id) = root.get_attribute("data-person-id") else {
        gloo::console::error!("availability-calendar: missing data-person-id attribute");
        return;
    };

    yew::Renderer::<App>::with_root_and_props(root, AppProps { person_id }).render();
}
