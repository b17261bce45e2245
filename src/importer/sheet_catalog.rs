// ==========================================
// 纺织生产经营看板 - 工作表/列名目录
// ==========================================
// 依据: 源工作簿固定结构 (17 张工作表)
// ==========================================

use crate::domain::types::SUPPORTED_YEARS;

// ==========================================
// 工作表名称
// ==========================================
pub mod sheets {
    pub const PRODUCTS: &str = "PRODUCTOS";
    pub const SUPPLIES: &str = "INSUMOS";
    pub const PROCESSES: &str = "PROCESOS";
    pub const SUPPLY_CONSUMPTION: &str = "CONSUMO_INSUMOS";
    pub const PROCESS_TIMES: &str = "TIEMPO_PROCESOS";

    // 年度表前缀: <PREFIX>_<year>
    pub const DEMAND_PREFIX: &str = "DEMANDA";
    pub const CAPACITY_PREFIX: &str = "CAPACIDAD";
    pub const COST_PREFIX: &str = "COSTOS";
}

// ==========================================
// 列名
// ==========================================
pub mod columns {
    pub const PRODUCT_ID: &str = "ID_Producto";
    pub const PRODUCT_NAME: &str = "Nombre_Producto";
    pub const CATEGORY: &str = "Categoria";
    pub const LINE: &str = "Linea";
    pub const TOTAL_PRODUCTION_MIN: &str = "TiempoProd_Total(min)";

    pub const SUPPLY_ID: &str = "ID_Insumo";
    pub const SUPPLY_NAME: &str = "Nombre_Insumo";
    pub const UNIT: &str = "Unidad_Medida";
    pub const UNIT_COST: &str = "Costo_Unitario(S/)";

    pub const PROCESS_ID: &str = "ID_Proceso";
    pub const PROCESS_NAME: &str = "Nombre_Proceso";
    pub const COST_PER_MINUTE: &str = "Costo_Minuto(S/)";

    pub const QUANTITY_REQUIRED: &str = "Cantidad_Requerida";
    pub const MINUTES: &str = "Tiempo_Minutos";

    pub const MONTH: &str = "Mes";
    pub const MIN_DEMAND: &str = "Demanda_Minima";
    pub const MAX_DEMAND: &str = "Demanda_Maxima";
    pub const SALE_PRICE: &str = "Precio_Venta(S/)";

    pub const AVAILABLE_MINUTES: &str = "Minutos_Disponibles";
    pub const AVAILABLE_OPERATORS: &str = "Operarios_Disponibles";

    pub const TOTAL_COST: &str = "Costo_Total(S/)";
}

/// 需求表名，如 DEMANDA_2024
pub fn demand_sheet(year: i32) -> String {
    format!("{}_{}", sheets::DEMAND_PREFIX, year)
}

/// 产能表名，如 CAPACIDAD_2024
pub fn capacity_sheet(year: i32) -> String {
    format!("{}_{}", sheets::CAPACITY_PREFIX, year)
}

/// 成本表名，如 COSTOS_2024
pub fn cost_sheet(year: i32) -> String {
    format!("{}_{}", sheets::COST_PREFIX, year)
}

/// 加载所需的全部工作表（主数据 5 张 + 每年 3 张）
pub fn required_sheets() -> Vec<String> {
    let mut names: Vec<String> = [
        sheets::PRODUCTS,
        sheets::SUPPLIES,
        sheets::PROCESSES,
        sheets::SUPPLY_CONSUMPTION,
        sheets::PROCESS_TIMES,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    names.extend(SUPPORTED_YEARS.iter().map(|y| demand_sheet(*y)));
    names.extend(SUPPORTED_YEARS.iter().map(|y| capacity_sheet(*y)));
    names.extend(SUPPORTED_YEARS.iter().map(|y| cost_sheet(*y)));
    names
}
