use hourglass_rs::{SafeTimeProvider, TimeSource};
use log::{debug, info};

use crate::decimal::Money;
use crate::errors::{ProductError, Result};
use crate::events::{Event, EventStore};
use crate::payments::{allocate, PaymentOutcome};
use crate::product::CreditProduct;
use crate::store::ProductStore;
use crate::types::{NewProduct, ProductId, ProductPatch};

/// owner of the credit product collection
///
/// holds the single in-memory source of truth and mirrors it to the store
/// after every mutation. a failed write surfaces as an error without
/// rolling back the in-memory change; `retry_persist` re-attempts only the
/// write
pub struct ProductManager {
    products: Vec<CreditProduct>,
    store: Box<dyn ProductStore>,
    events: EventStore,
    dirty: bool,
}

impl ProductManager {
    /// start with an empty collection
    pub fn new(store: Box<dyn ProductStore>) -> Self {
        Self {
            products: Vec::new(),
            store,
            events: EventStore::new(),
            dirty: false,
        }
    }

    /// load the stored collection and bring every product's accrued
    /// interest current
    ///
    /// persists once iff the sweep folded any interest in, so a reload
    /// with nothing to accrue performs no write at all
    pub fn hydrate(store: Box<dyn ProductStore>, time_provider: &SafeTimeProvider) -> Result<Self> {
        let products = store.load()?;
        info!("hydrated {} credit products", products.len());

        let mut manager = Self {
            products,
            store,
            events: EventStore::new(),
            dirty: false,
        };

        if manager.sweep_accruals(time_provider) {
            manager.dirty = true;
            manager.persist()?;
        }

        Ok(manager)
    }

    /// hydrate with system time
    pub fn hydrate_now(store: Box<dyn ProductStore>) -> Result<Self> {
        let time = SafeTimeProvider::new(TimeSource::System);
        Self::hydrate(store, &time)
    }

    /// fold accrued interest into every qualifying product; true when any
    /// product actually accrued
    fn sweep_accruals(&mut self, time_provider: &SafeTimeProvider) -> bool {
        let now = time_provider.now();
        let mut changed = false;

        for product in &mut self.products {
            let interest = product.accrue_to(now);
            if !interest.is_zero() {
                changed = true;
                debug!("accrued {} on product {}", interest, product.id);
                self.events.emit(Event::InterestAccrued {
                    product_id: product.id,
                    amount: interest,
                    timestamp: now,
                });
            }
        }

        changed
    }

    /// run the accrual sweep on demand, persisting when anything accrued
    pub fn accrue_all(&mut self, time_provider: &SafeTimeProvider) -> Result<bool> {
        let changed = self.sweep_accruals(time_provider);
        if changed {
            self.dirty = true;
            self.persist()?;
        }
        Ok(changed)
    }

    /// create a new product
    pub fn create(
        &mut self,
        request: NewProduct,
        time_provider: &SafeTimeProvider,
    ) -> Result<CreditProduct> {
        if request.principal <= Money::ZERO {
            return Err(ProductError::InvalidPrincipal {
                principal: request.principal,
            });
        }
        if request.apr.is_negative() {
            return Err(ProductError::InvalidRate { rate: request.apr });
        }

        let now = time_provider.now();
        let product = CreditProduct::new(request, now);
        info!("created product {} ({})", product.name, product.id);

        self.events.emit(Event::ProductCreated {
            product_id: product.id,
            name: product.name.clone(),
            principal: product.principal,
            apr: product.apr,
            timestamp: now,
        });

        let created = product.clone();
        self.products.push(product);
        self.dirty = true;
        self.persist()?;

        Ok(created)
    }

    /// create with system time
    pub fn create_now(&mut self, request: NewProduct) -> Result<CreditProduct> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.create(request, &time)
    }

    /// patch an existing product field by field
    ///
    /// the derived daily rate is recomputed only when the patch carries a
    /// new apr
    pub fn update(
        &mut self,
        id: ProductId,
        patch: ProductPatch,
        time_provider: &SafeTimeProvider,
    ) -> Result<CreditProduct> {
        if let Some(apr) = patch.apr {
            if apr.is_negative() {
                return Err(ProductError::InvalidRate { rate: apr });
            }
        }

        let now = time_provider.now();
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProductError::NotFound { id })?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(apr) = patch.apr {
            product.set_apr(apr);
        }
        if let Some(kind) = patch.kind {
            product.kind = kind;
        }
        if let Some(note) = patch.note {
            product.note = Some(note);
        }
        product.touch(now);

        let updated = product.clone();
        debug!("updated product {}", id);
        self.events.emit(Event::ProductUpdated {
            product_id: id,
            timestamp: now,
        });

        self.dirty = true;
        self.persist()?;

        Ok(updated)
    }

    /// remove a product by id
    pub fn delete(&mut self, id: ProductId, time_provider: &SafeTimeProvider) -> Result<()> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            return Err(ProductError::NotFound { id });
        }

        info!("deleted product {}", id);
        self.events.emit(Event::ProductDeleted {
            product_id: id,
            timestamp: time_provider.now(),
        });

        self.dirty = true;
        self.persist()
    }

    /// apply a payment through the waterfall: interest first, then
    /// principal, overpayment absorbed
    pub fn apply_payment(
        &mut self,
        id: ProductId,
        amount: Money,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentOutcome> {
        if amount <= Money::ZERO {
            return Err(ProductError::InvalidAmount { amount });
        }

        let now = time_provider.now();
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProductError::NotFound { id })?;

        // bring interest current up to the payment moment
        let interest_accrued = product.accrue_to(now);
        if !interest_accrued.is_zero() {
            self.events.emit(Event::InterestAccrued {
                product_id: id,
                amount: interest_accrued,
                timestamp: now,
            });
        }

        let breakdown = allocate(amount, product.accrued_interest, product.remaining_balance);
        product.apply_breakdown(&breakdown);

        if let Some((old_status, new_status)) = product.refresh_status() {
            self.events.emit(Event::StatusChanged {
                product_id: id,
                old_status,
                new_status,
                timestamp: now,
            });
        }
        product.touch(now);

        info!(
            "payment of {} on product {}: balance now {}",
            amount, id, product.remaining_balance
        );
        self.events.emit(Event::PaymentApplied {
            product_id: id,
            amount,
            applied_to_interest: breakdown.to_interest,
            applied_to_principal: breakdown.to_principal,
            remaining_balance: product.remaining_balance,
            timestamp: now,
        });

        let outcome = PaymentOutcome {
            product_id: id,
            amount,
            interest_accrued,
            breakdown,
            remaining_balance: product.remaining_balance,
            status: product.status,
            payment_date: now,
        };

        self.dirty = true;
        self.persist()?;

        Ok(outcome)
    }

    /// apply a payment with system time
    pub fn apply_payment_now(&mut self, id: ProductId, amount: Money) -> Result<PaymentOutcome> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.apply_payment(id, amount, &time)
    }

    /// record a spend event on a revolving product, increasing the balance
    pub fn add_charge(
        &mut self,
        id: ProductId,
        amount: Money,
        time_provider: &SafeTimeProvider,
    ) -> Result<CreditProduct> {
        if amount <= Money::ZERO {
            return Err(ProductError::InvalidAmount { amount });
        }

        let now = time_provider.now();
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ProductError::NotFound { id })?;

        if !product.kind.accepts_charges() {
            return Err(ProductError::ChargeNotSupported {
                kind: product.kind.label(),
            });
        }

        let interest_accrued = product.accrue_to(now);
        if !interest_accrued.is_zero() {
            self.events.emit(Event::InterestAccrued {
                product_id: id,
                amount: interest_accrued,
                timestamp: now,
            });
        }

        product.apply_charge(amount);

        if let Some((old_status, new_status)) = product.refresh_status() {
            self.events.emit(Event::StatusChanged {
                product_id: id,
                old_status,
                new_status,
                timestamp: now,
            });
        }
        product.touch(now);

        info!(
            "charge of {} on product {}: balance now {}",
            amount, id, product.remaining_balance
        );
        self.events.emit(Event::ChargeAdded {
            product_id: id,
            amount,
            remaining_balance: product.remaining_balance,
            timestamp: now,
        });

        let updated = product.clone();
        self.dirty = true;
        self.persist()?;

        Ok(updated)
    }

    /// add a charge with system time
    pub fn add_charge_now(&mut self, id: ProductId, amount: Money) -> Result<CreditProduct> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.add_charge(id, amount, &time)
    }

    /// lookup by id
    pub fn get(&self, id: ProductId) -> Option<&CreditProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    /// the active subset of the collection
    pub fn active(&self) -> Vec<&CreditProduct> {
        self.products.iter().filter(|p| p.is_active()).collect()
    }

    /// the full collection
    pub fn products(&self) -> &[CreditProduct] {
        &self.products
    }

    /// whether an earlier persistence write failed and has not been
    /// retried successfully yet
    pub fn has_unflushed_changes(&self) -> bool {
        self.dirty
    }

    /// re-attempt a failed persistence write; the computation is not
    /// re-run
    pub fn retry_persist(&mut self) -> Result<()> {
        if self.dirty {
            self.persist()
        } else {
            Ok(())
        }
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.products)?;
        self.dirty = false;
        Ok(())
    }

    /// drain collected breadcrumbs
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}
