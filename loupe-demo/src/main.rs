//! loupe demo - two independent lightbox galleries on one page

mod demo_data;

use dioxus::prelude::*;
use loupe_common::LightboxConfig;
use loupe_ui::LightboxGallery;

pub const LIGHTBOX_CSS: Asset = asset!("/assets/lightbox.css");

#[component]
pub fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: LIGHTBOX_CSS }
        main { class: "demo",
            h1 { "loupe" }
            for album in demo_data::albums() {
                section { key: "{album.title}", class: "demo__album",
                    h2 { "{album.title}" }
                    LightboxGallery {
                        images: album.images.clone(),
                        config: album_config(album.plain),
                    }
                }
            }
        }
    }
}

fn album_config(plain: bool) -> LightboxConfig {
    if plain {
        LightboxConfig {
            keyboard: false,
            show_counter: false,
            ..LightboxConfig::default()
        }
    } else {
        LightboxConfig::default()
    }
}

fn main() {
    dioxus::launch(App);
}
