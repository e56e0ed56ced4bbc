// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One QR scan registered at the gate (entry or exit).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    #[serde(rename = "id_escaneo")]
    pub scan_id: i64,
    #[serde(rename = "fecha_escaneo")]
    pub scanned_at: DateTime<Utc>,
    #[serde(rename = "dispositivo")]
    pub device: String,
    #[serde(rename = "nombre_guardia")]
    pub guard_name: String,
    #[serde(rename = "nombre_visitante")]
    pub visitor_name: String,
    #[serde(rename = "dni_visitante")]
    pub visitor_dni: String,
    #[serde(rename = "tipo_vehiculo")]
    pub vehicle_type: String,
    #[serde(rename = "placa_vehiculo")]
    pub vehicle_plate: String,
    #[serde(rename = "motivo_visita")]
    pub visit_reason: String,
    #[serde(rename = "nombre_residente")]
    pub resident_name: String,
    #[serde(rename = "unidad_residencial")]
    pub residential_unit: String,
    #[serde(rename = "estado_visita")]
    pub visit_status: String,
    // "entrada" or "salida"
    #[serde(rename = "tipo_escaneo")]
    pub scan_kind: String,
}

/// Scan activity for a single day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyScans {
    #[serde(rename = "escaneos")]
    pub scans: Vec<ScanRecord>,
    #[serde(rename = "total_escaneos")]
    pub total: i64,
    #[serde(rename = "fecha_consulta")]
    pub queried_at: DateTime<Utc>,
}
