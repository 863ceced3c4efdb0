/// Upstream entity types the dashboard can list.
///
/// Each kind carries its Service Layer collection path, the `$select`
/// projection the dashboard needs, a page size, and (where the upstream
/// field names differ from the dashboard contract) a rename table applied
/// by the gateway before records leave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    BusinessPartners,
    Items,
    SalesOrders,
    Locations,
    Branches,
    Warehouses,
}

/// Upstream field name -> dashboard field name. A source field may appear
/// in more than one row (branches project `Name` into `Description` too).
type FieldMap = &'static [(&'static str, &'static str)];

const BRANCH_FIELDS: FieldMap = &[
    ("Code", "Code"),
    ("Name", "Name"),
    ("Name", "Description"),
    ("Disabled", "Disabled"),
    ("Street", "Address"),
    ("City", "City"),
    ("Country", "Country"),
];

const WAREHOUSE_FIELDS: FieldMap = &[
    ("WarehouseCode", "WhsCode"),
    ("WarehouseName", "WhsName"),
    ("Location", "Location"),
    ("Inactive", "Inactive"),
    ("Locked", "Locked"),
    ("Street", "Address"),
    ("Country", "Country"),
    ("City", "City"),
    ("BinActivat", "BinActivat"),
];

impl ResourceKind {
    /// Service Layer collection path segment.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::BusinessPartners => "BusinessPartners",
            ResourceKind::Items => "Items",
            ResourceKind::SalesOrders => "Orders",
            ResourceKind::Locations => "Locations",
            ResourceKind::Branches => "Branches",
            ResourceKind::Warehouses => "Warehouses",
        }
    }

    /// `$select` projection, where the dashboard only needs a subset.
    pub fn select(self) -> Option<&'static str> {
        match self {
            ResourceKind::BusinessPartners => {
                Some("CardCode,CardName,CardType,Valid,CurrentAccountBalance,Currency")
            }
            ResourceKind::Items => Some("ItemCode,ItemName,ItemType,Valid,QuantityOnStock"),
            ResourceKind::SalesOrders => {
                Some("DocEntry,DocNum,CardCode,CardName,DocDate,DocTotal,DocumentStatus")
            }
            ResourceKind::Locations | ResourceKind::Branches | ResourceKind::Warehouses => None,
        }
    }

    pub fn page_size(self) -> u32 {
        match self {
            ResourceKind::BusinessPartners | ResourceKind::Items | ResourceKind::SalesOrders => 50,
            ResourceKind::Locations | ResourceKind::Branches | ResourceKind::Warehouses => 100,
        }
    }

    pub fn field_map(self) -> Option<FieldMap> {
        match self {
            ResourceKind::Branches => Some(BRANCH_FIELDS),
            ResourceKind::Warehouses => Some(WAREHOUSE_FIELDS),
            _ => None,
        }
    }

    /// Human-readable name used in error and log messages.
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::BusinessPartners => "business partners",
            ResourceKind::Items => "items",
            ResourceKind::SalesOrders => "sales orders",
            ResourceKind::Locations => "locations",
            ResourceKind::Branches => "branches",
            ResourceKind::Warehouses => "warehouses",
        }
    }
}
