// SPDX-FileCopyrightText: 2026 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

/// Key of the layer a freshly created map starts with.
pub const DEFAULT_LAYER_KEY: &str = "street";

/// One selectable base tile style.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseLayer {
    pub key: String,
    pub name: String,
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl BaseLayer {
    pub fn new(key: &str, name: &str, url_template: &str, attribution: &str, max_zoom: u8) -> Self {
        BaseLayer {
            key: key.to_string(),
            name: name.to_string(),
            url_template: url_template.to_string(),
            attribution: attribution.to_string(),
            max_zoom,
        }
    }
}

/// The built-in base layer catalog in presentation order.
pub fn default_layers() -> Vec<BaseLayer> {
    vec![
        BaseLayer::new(
            DEFAULT_LAYER_KEY,
            "Street",
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            "© OpenStreetMap contributors",
            19,
        ),
        BaseLayer::new(
            "satellite",
            "Satellite",
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
            "Tiles © Esri",
            19,
        ),
        BaseLayer::new(
            "hybrid",
            "Hybrid",
            "https://{s}.google.com/vt/lyrs=y&x={x}&y={y}&z={z}",
            "Map data © Google",
            20,
        ),
    ]
}
