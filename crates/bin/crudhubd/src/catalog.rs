//! The entity types served by the daemon, and the host-provided product
//! service that takes precedence over a generated one.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crudhub_app::ports::PagingAndSortingRepository;
use crudhub_app::services::{CachingCrudService, CrudService};
use crudhub_domain::define_id;
use crudhub_domain::entity::Entity;
use crudhub_domain::entity_type::EntityType;
use crudhub_domain::error::CrudError;
use crudhub_domain::paging::{Page, PageRequest, Sort};

define_id!(
    /// Unique identifier for an order.
    OrderId
);

define_id!(
    /// Unique identifier for a customer.
    CustomerId
);

define_id!(
    /// Unique identifier for a product.
    ProductId
);

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: Option<OrderId>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    pub total_cents: u64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    #[must_use]
    pub fn new(customer_id: Option<CustomerId>, total_cents: u64) -> Self {
        Self {
            id: None,
            customer_id,
            total_cents,
            created_at: Utc::now(),
        }
    }
}

impl Entity for Order {
    type Id = OrderId;
    const NAME: &'static str = "Order";

    fn id(&self) -> Option<OrderId> {
        self.id
    }

    fn set_id(&mut self, id: OrderId) {
        self.id = Some(id);
    }
}

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub id: Option<CustomerId>,
    pub name: String,
    pub email: String,
}

impl Customer {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Entity for Customer {
    type Id = CustomerId;
    const NAME: &'static str = "Customer";

    fn id(&self) -> Option<CustomerId> {
        self.id
    }

    fn set_id(&mut self, id: CustomerId) {
        self.id = Some(id);
    }
}

/// An item for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<ProductId>,
    pub sku: String,
    pub name: String,
    pub price_cents: u64,
}

impl Product {
    #[must_use]
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price_cents: u64) -> Self {
        Self {
            id: None,
            sku: sku.into(),
            name: name.into(),
            price_cents,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;
    const NAME: &'static str = "Product";

    fn id(&self) -> Option<ProductId> {
        self.id
    }

    fn set_id(&mut self, id: ProductId) {
        self.id = Some(id);
    }
}

/// Entity types addressable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Order,
    Customer,
    Product,
}

impl EntityKind {
    pub const ALL: [Self; 3] = [Self::Order, Self::Customer, Self::Product];

    #[must_use]
    pub fn entity_type(self) -> EntityType {
        match self {
            Self::Order => Order::entity_type(),
            Self::Customer => Customer::entity_type(),
            Self::Product => Product::entity_type(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.entity_type(), f)
    }
}

/// Product service supplied by the host: stores SKUs upper-cased and
/// otherwise behaves like the generated service.
pub struct ProductService {
    inner: CachingCrudService<Product>,
}

impl ProductService {
    /// Create the service over `repository`.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::Precondition`] if the underlying service cannot
    /// be assembled.
    pub fn new(
        repository: Arc<dyn PagingAndSortingRepository<Product>>,
    ) -> Result<Self, CrudError> {
        Ok(Self {
            inner: CachingCrudService::new(Product::entity_type(), repository)?,
        })
    }
}

impl CrudService<Product> for ProductService {
    fn entity_type(&self) -> EntityType {
        self.inner.entity_type()
    }

    fn find_all(&self) -> Result<Vec<Product>, CrudError> {
        self.inner.find_all()
    }

    fn find_all_sorted(&self, sort: &Sort) -> Result<Vec<Product>, CrudError> {
        self.inner.find_all_sorted(sort)
    }

    fn find_page(&self, request: &PageRequest) -> Result<Page<Product>, CrudError> {
        self.inner.find_page(request)
    }

    fn find(&self, id: &ProductId) -> Result<Option<Product>, CrudError> {
        self.inner.find(id)
    }

    fn save(&self, mut entity: Product) -> Result<Product, CrudError> {
        entity.sku = entity.sku.trim().to_uppercase();
        self.inner.save(entity)
    }

    fn delete_by_id(&self, id: &ProductId) -> Result<(), CrudError> {
        self.inner.delete_by_id(id)
    }
}
