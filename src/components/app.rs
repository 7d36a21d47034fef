use yew::prelude::*;

use super::ShopMap;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <main class="app">
            <ShopMap container_id="map" />
        </main>
    }
}
