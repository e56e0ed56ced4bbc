// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the admin visit-history report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitHistoryItem {
    #[serde(rename = "nombre_residente")]
    pub resident_name: String,
    #[serde(rename = "telefono_residente")]
    pub resident_phone: String,
    #[serde(rename = "unidad_residencial")]
    pub residential_unit: String,
    #[serde(rename = "fecha_entrada")]
    pub entry_at: DateTime<Utc>,
    #[serde(rename = "nombre_visitante")]
    pub visitor_name: String,
    #[serde(rename = "tipo_vehiculo")]
    pub vehicle_type: String,
    #[serde(rename = "placa_vehiculo")]
    pub vehicle_plate: String,
    #[serde(rename = "marca_vehiculo")]
    pub vehicle_brand: Option<String>,
    #[serde(rename = "color_vehiculo")]
    pub vehicle_color: Option<String>,
    #[serde(rename = "motivo_visita")]
    pub visit_reason: String,
    #[serde(rename = "fecha_salida")]
    pub exit_at: Option<DateTime<Utc>>,
    #[serde(rename = "estado")]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitHistory {
    #[serde(rename = "visitas")]
    pub visits: Vec<VisitHistoryItem>,
}

/// Visitor details inside a visit-creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorDetails {
    #[serde(rename = "nombre_conductor")]
    pub driver_name: String,
    #[serde(rename = "dni_conductor")]
    pub driver_dni: String,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "tipo_vehiculo")]
    pub vehicle_type: Option<String>,
    #[serde(rename = "placa_vehiculo")]
    pub vehicle_plate: Option<String>,
    #[serde(rename = "motivo_visita")]
    pub visit_reason: Option<String>,
}

/// Request body for resident visit creation.
/// The backend names the free-form notes field "motivo" on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVisit {
    #[serde(rename = "visitantes")]
    pub visitors: Vec<VisitorDetails>,
    #[serde(rename = "motivo")]
    pub reason: String,
    #[serde(rename = "fecha_entrada", skip_serializing_if = "Option::is_none")]
    pub entry_at: Option<DateTime<Utc>>,
    #[serde(rename = "acompanantes", skip_serializing_if = "Option::is_none")]
    pub companions: Option<Vec<String>>,
}

/// Backend response for a created visit, QR token included.
/// The base64 QR image is deliberately not modeled - rendering is a UI concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitReceipt {
    pub id: i64,
    #[serde(rename = "residente_id")]
    pub resident_id: Option<i64>,
    #[serde(rename = "guardia_id")]
    pub guard_id: Option<i64>,
    #[serde(rename = "visitante")]
    pub visitor: VisitorDetails,
    #[serde(rename = "notas")]
    pub notes: Option<String>,
    #[serde(rename = "fecha_entrada")]
    pub entry_at: DateTime<Utc>,
    #[serde(rename = "fecha_salida")]
    pub exit_at: Option<DateTime<Utc>>,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "qr_code")]
    pub qr_code: String,
    #[serde(rename = "qr_expiracion")]
    pub qr_expires_at: DateTime<Utc>,
    #[serde(rename = "tipo_creador")]
    pub creator_kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_visit_serializes_wire_names() {
        let visit = NewVisit {
            visitors: vec![VisitorDetails {
                driver_name: "Ana Pérez".to_string(),
                driver_dni: "12345678".to_string(),
                phone: None,
                vehicle_type: Some("auto".to_string()),
                vehicle_plate: None,
                visit_reason: Some("entrega".to_string()),
            }],
            reason: "entrega de paquete".to_string(),
            entry_at: None,
            companions: None,
        };

        let json = serde_json::to_value(&visit).expect("serialize");
        assert!(json.get("visitantes").is_some());
        assert_eq!(json["motivo"], "entrega de paquete");
        // Optional fields skip serialization entirely when absent
        assert!(json.get("fecha_entrada").is_none());
        assert_eq!(json["visitantes"][0]["nombre_conductor"], "Ana Pérez");
    }
}
