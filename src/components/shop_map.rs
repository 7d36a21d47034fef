use yew::prelude::*;

use crate::hooks::use_shop_map;

#[derive(Properties, PartialEq)]
pub struct ShopMapProps {
    #[prop_or(AttrValue::from("map"))]
    pub container_id: AttrValue,
}

#[function_component(ShopMap)]
pub fn shop_map(props: &ShopMapProps) -> Html {
    let handle = use_shop_map(props.container_id.clone());
    let state = &*handle.state;

    // Error fatal: el panel reemplaza al mapa
    if let Some(error) = state.fatal_error() {
        return html! {
            <div class="map-error" role="alert">
                <p class="map-error__title">{ "지도를 표시할 수 없습니다" }</p>
                <p class="map-error__message">{ error.message.clone() }</p>
            </div>
        };
    }

    html! {
        <div class="map-wrapper" style="position:relative;width:100%;height:100vh;">
            <div id={props.container_id.clone()} class="map-container" style="width:100%;height:100%;"></div>
            if state.loading {
                <div class="map-loading" aria-busy="true">
                    <div class="map-loading__spinner"></div>
                    <span>{ "매장 위치를 불러오는 중..." }</span>
                </div>
            }
            if let Some(notice) = state.notice() {
                <div class="map-notice" role="status">{ notice.message.clone() }</div>
            }
        </div>
    }
}
