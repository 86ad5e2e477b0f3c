// Geolocation Record returned by a lookup

use serde::{Deserialize, Deserializer, Serialize};

/// Geolocation metadata for one IP address, as reported by ipstack.
///
/// Every field is optional or defaulted: the service answers reserved and
/// private ranges with most fields set to `null`. The pool never inspects or
/// modifies a record; it is handed to the feedback port as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoRecord {
    pub ip: String,
    pub hostname: Option<String>,
    #[serde(rename = "type")]
    pub ip_type: Option<String>,
    pub continent_code: Option<String>,
    pub continent_name: Option<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub region_code: Option<String>,
    pub region_name: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location: Option<Location>,
    pub time_zone: Option<TimeZone>,
    pub currency: Option<Currency>,
    pub connection: Option<Connection>,
    pub security: Option<Security>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub geoname_id: Option<i64>,
    pub capital: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<Language>,
    pub country_flag: Option<String>,
    pub country_flag_emoji: Option<String>,
    pub country_flag_emoji_unicode: Option<String>,
    pub calling_code: Option<String>,
    pub is_eu: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub code: Option<String>,
    pub name: Option<String>,
    pub native: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeZone {
    pub id: Option<String>,
    pub current_time: Option<String>,
    pub gmt_offset: Option<i64>,
    pub code: Option<String>,
    pub is_daylight_saving: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Currency {
    pub code: Option<String>,
    pub name: Option<String>,
    pub plural: Option<String>,
    pub symbol: Option<String>,
    pub symbol_native: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connection {
    pub asn: Option<i64>,
    pub isp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Security {
    pub is_proxy: Option<bool>,
    pub proxy_type: Option<String>,
    pub is_crawler: Option<bool>,
    pub crawler_name: Option<String>,
    pub crawler_type: Option<String>,
    pub is_tor: Option<bool>,
    pub threat_level: Option<String>,
    pub threat_types: Option<Vec<String>>,
}

/// `#[serde(default)]` only covers a missing key; ipstack also sends explicit
/// `null` for collections it has no data for.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl GeoRecord {
    /// Minimal record carrying only the IP (used by test doubles).
    pub fn for_ip(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_response() {
        let body = serde_json::json!({
            "ip": "134.201.250.155",
            "hostname": "134.201.250.155",
            "type": "ipv4",
            "continent_code": "NA",
            "continent_name": "North America",
            "country_code": "US",
            "country_name": "United States",
            "region_code": "CA",
            "region_name": "California",
            "city": "Los Angeles",
            "zip": "90013",
            "latitude": 34.0453,
            "longitude": -118.2413,
            "location": {
                "geoname_id": 5368361,
                "capital": "Washington D.C.",
                "languages": [{"code": "en", "name": "English", "native": "English"}],
                "country_flag": "https://assets.ipstack.com/images/assets/flags_svg/us.svg",
                "calling_code": "1",
                "is_eu": false
            },
            "time_zone": {"id": "America/Los_Angeles", "gmt_offset": -25200, "code": "PDT", "is_daylight_saving": true},
            "currency": {"code": "USD", "name": "US Dollar", "symbol": "$"},
            "connection": {"asn": 25876, "isp": "Los Angeles Department of Water & Power"},
            "security": {"is_proxy": false, "proxy_type": null, "is_tor": false, "threat_level": "low"}
        });

        let record: GeoRecord = serde_json::from_value(body).unwrap();
        assert_eq!(record.ip, "134.201.250.155");
        assert_eq!(record.ip_type.as_deref(), Some("ipv4"));
        assert_eq!(record.city.as_deref(), Some("Los Angeles"));
        let location = record.location.unwrap();
        assert_eq!(location.languages.len(), 1);
        assert_eq!(location.is_eu, Some(false));
        assert_eq!(record.connection.unwrap().asn, Some(25876));
        assert_eq!(record.security.unwrap().proxy_type, None);
    }

    #[test]
    fn test_decode_reserved_range_with_nulls() {
        let body = serde_json::json!({
            "ip": "10.0.0.1",
            "type": "ipv4",
            "continent_code": null,
            "country_code": null,
            "latitude": 0,
            "longitude": 0,
            "location": {"languages": []}
        });

        let record: GeoRecord = serde_json::from_value(body).unwrap();
        assert_eq!(record.ip, "10.0.0.1");
        assert!(record.country_code.is_none());
        assert_eq!(record.latitude, Some(0.0));
        assert!(record.time_zone.is_none());
    }

    #[test]
    fn test_decode_private_range_with_null_languages() {
        let body = serde_json::json!({
            "ip": "192.168.1.1",
            "type": "ipv4",
            "continent_code": null,
            "country_name": null,
            "city": null,
            "latitude": null,
            "longitude": null,
            "location": {
                "geoname_id": null,
                "capital": null,
                "languages": null,
                "country_flag": null,
                "calling_code": null,
                "is_eu": null
            },
            "time_zone": null,
            "connection": null
        });

        let record: GeoRecord = serde_json::from_value(body).unwrap();
        assert_eq!(record.ip, "192.168.1.1");
        assert!(record.latitude.is_none());
        let location = record.location.unwrap();
        assert!(location.languages.is_empty());
        assert!(location.is_eu.is_none());
    }

    #[test]
    fn test_decode_location_without_languages_key() {
        let record: GeoRecord =
            serde_json::from_value(serde_json::json!({"ip": "10.0.0.2", "location": {}})).unwrap();
        assert!(record.location.unwrap().languages.is_empty());
    }
}
