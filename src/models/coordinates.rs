use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Kakao devuelve x = longitud, y = latitud como strings
    pub fn from_kakao_xy(x: &str, y: &str) -> Option<Self> {
        let longitude = x.trim().parse::<f64>().ok()?;
        let latitude = y.trim().parse::<f64>().ok()?;
        let coords = Self::new(latitude, longitude);
        coords.is_valid().then_some(coords)
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}
