//! The day-long greedy scheduler.

use tracing::{debug, trace, warn};

use super::{trim_shift, ShiftPlan};
use crate::cluster::CandidateSet;
use crate::config::EngineConfig;
use crate::distance::DistanceMatrix;
use crate::evaluation::RouteEvaluator;
use crate::models::{
    CategoryId, DayPlan, Order, RejectReason, Resource, ResourceCategory, ResourcePool, Route,
    Shop, Undeliverable,
};
use crate::search::{PermutationCache, RouteOptimizer, SelectionPolicy};

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Asking every category for its best next shipment.
    Scanning,
    /// Committing the winning shipment.
    Committing,
    /// Reporting the orders no category could take.
    Draining,
    /// Finished.
    Done,
}

/// The best next shipment of one round.
#[derive(Debug, Clone)]
enum Shipment<'a> {
    /// One route for a flat-fee carrier account.
    FlatFee { route: Route, account: &'a Resource },
    /// A trimmed chain of routes for a fresh hourly courier.
    Shift {
        plan: ShiftPlan,
        template: &'a Resource,
    },
}

impl Shipment<'_> {
    fn cost_per_order(&self) -> f64 {
        match self {
            Shipment::FlatFee { route, .. } => route.cost_per_order(),
            Shipment::Shift { plan, .. } => plan.cost_per_order(),
        }
    }
}

/// Greedy scheduler for one shop-day.
///
/// Every round each enabled category proposes its best next shipment:
/// flat-fee carriers one route, hourly couriers a whole trimmed shift.
/// The winner is committed and its orders completed, then the next round
/// starts from the updated order state. When no category can propose
/// anything, the remaining orders are reported undeliverable.
pub struct DayScheduler<'a> {
    config: &'a EngineConfig,
    optimizer: RouteOptimizer<'a>,
    shop: &'a Shop,
    pool: &'a ResourcePool,
    distances: &'a DistanceMatrix,
    next_resource_id: u64,
    phase: Phase,
}

impl<'a> DayScheduler<'a> {
    /// Creates a scheduler. Couriers created during the day are numbered
    /// after the largest template ID of the pool.
    pub fn new(
        config: &'a EngineConfig,
        cache: &'a PermutationCache,
        shop: &'a Shop,
        pool: &'a ResourcePool,
        distances: &'a DistanceMatrix,
    ) -> Self {
        Self {
            config,
            optimizer: RouteOptimizer::new(cache, config),
            shop,
            pool,
            distances,
            next_resource_id: pool.max_resource_id(),
            phase: Phase::Scanning,
        }
    }

    /// Current state.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Runs the day to completion, marking delivered orders completed.
    pub fn run(&mut self, orders: &mut [Order]) -> DayPlan {
        let mut plan = DayPlan::new();
        let mut pending = None;
        loop {
            match self.phase {
                Phase::Scanning => {
                    pending = self.scan(orders);
                    self.transition(if pending.is_some() {
                        Phase::Committing
                    } else {
                        Phase::Draining
                    });
                }
                Phase::Committing => {
                    if let Some(shipment) = pending.take() {
                        self.commit(shipment, orders, &mut plan);
                    }
                    self.transition(Phase::Scanning);
                }
                Phase::Draining => {
                    self.drain(orders, &mut plan);
                    self.transition(Phase::Done);
                }
                Phase::Done => break,
            }
        }
        plan
    }

    fn transition(&mut self, next: Phase) {
        trace!(from = ?self.phase, to = ?next, "scheduler phase");
        self.phase = next;
    }

    /// Categories enabled at the shop that have at least one resource.
    fn categories(&self) -> impl Iterator<Item = &'a dyn ResourceCategory> + '_ {
        let pool = self.pool;
        self.pool
            .categories()
            .iter()
            .filter(move |c| self.shop.allows(c.id()) && pool.templates_for(c.id()).next().is_some())
            .map(|c| &**c)
    }

    fn scan(&self, orders: &[Order]) -> Option<Shipment<'a>> {
        let mut flat: Option<Shipment<'a>> = None;
        let mut shift: Option<Shipment<'a>> = None;

        for category in self.categories() {
            for template in self.pool.templates_for(category.id()) {
                if let Some(rate) = category.hourly_rate() {
                    let chain = self.build_chain(category, template, orders);
                    let insurance = category.profile().insurance;
                    let Some(plan) =
                        trim_shift(chain, rate, insurance, self.config.cost_per_order_threshold)
                    else {
                        continue;
                    };
                    let better = match &shift {
                        Some(Shipment::Shift { plan: best, .. }) => {
                            plan.cost_per_order() < best.cost_per_order()
                                || (plan.cost_per_order() == best.cost_per_order()
                                    && plan.orders() > best.orders())
                        }
                        _ => true,
                    };
                    if better {
                        shift = Some(Shipment::Shift { plan, template });
                    }
                } else if let Some(route) = self.flat_fee_route(category, template, orders) {
                    let better = flat
                        .as_ref()
                        .is_none_or(|best| route.cost_per_order() < best.cost_per_order());
                    if better {
                        flat = Some(Shipment::FlatFee {
                            route,
                            account: template,
                        });
                    }
                }
            }
        }

        match (flat, shift) {
            (Some(flat), Some(shift)) => {
                let hourly = shift.cost_per_order();
                if hourly > self.config.cost_per_order_threshold
                    && hourly > flat.cost_per_order()
                {
                    Some(flat)
                } else {
                    Some(shift)
                }
            }
            (flat, shift) => shift.or(flat),
        }
    }

    /// Best single route a flat-fee carrier can take right now.
    fn flat_fee_route(
        &self,
        category: &dyn ResourceCategory,
        account: &Resource,
        orders: &[Order],
    ) -> Option<Route> {
        let evaluator =
            RouteEvaluator::new(orders, self.distances, category, account, self.config.clock());
        let candidates = CandidateSet::build(&evaluator, self.config.minute_cap, |_| true);
        let anchor = candidates.anchor()?;
        let group = candidates.co_deliverable(&anchor);
        self.optimizer
            .optimize(&evaluator, anchor.order, &group, SelectionPolicy::MinCost)
            .or_else(|| evaluator.build_single(anchor.order).ok())
    }

    /// Sequential routes one fresh courier cloned from `template` could
    /// drive for the rest of the day.
    fn build_chain(
        &self,
        category: &dyn ResourceCategory,
        template: &Resource,
        orders: &[Order],
    ) -> Vec<Route> {
        let mut courier = template.instantiate(template.id());
        let mut taken = vec![false; orders.len()];
        let mut chain = Vec::new();
        loop {
            let evaluator =
                RouteEvaluator::new(orders, self.distances, category, &courier, self.config.clock());
            let candidates =
                CandidateSet::build(&evaluator, self.config.minute_cap, |o| !taken[o]);
            let Some(anchor) = candidates.anchor() else {
                break;
            };
            let group = candidates.co_deliverable(&anchor);
            let Some(route) = self
                .optimizer
                .optimize(&evaluator, anchor.order, &group, SelectionPolicy::MaxCoverage)
                .or_else(|| evaluator.build_single(anchor.order).ok())
            else {
                break;
            };
            for stop in route.stops() {
                taken[stop.order] = true;
            }
            courier.occupy_until(route.return_time());
            chain.push(route);
        }
        chain
    }

    fn commit(&mut self, shipment: Shipment<'a>, orders: &mut [Order], plan: &mut DayPlan) {
        match shipment {
            Shipment::FlatFee { mut route, account } => {
                route.assign(account.id());
                complete(&route, orders);
                if plan.resource_mut(account.id()).is_none() {
                    plan.add_resource(account.instantiate(account.id()));
                }
                if let Some(resource) = plan.resource_mut(account.id()) {
                    resource.record_route(route.len(), route.cost(), route.delivery_time());
                }
                debug!(
                    category = route.category(),
                    resource = account.id(),
                    orders = route.len(),
                    cost = route.cost(),
                    dispatch = route.dispatch_time(),
                    "committed flat-fee route"
                );
                plan.add_route(route);
            }
            Shipment::Shift { plan: shift, template } => {
                self.next_resource_id += 1;
                let mut courier = template.instantiate(self.next_resource_id);
                let (work_time, cost) = (shift.work_time(), shift.cost());
                debug!(
                    category = template.category(),
                    resource = courier.id(),
                    routes = shift.routes().len(),
                    orders = shift.orders(),
                    cost,
                    start = shift.start(),
                    "committed hourly shift"
                );
                for mut route in shift.into_routes() {
                    route.assign(courier.id());
                    complete(&route, orders);
                    courier.record_route(route.len(), route.cost(), route.delivery_time());
                    courier.occupy_until(route.return_time());
                    plan.add_route(route);
                }
                courier.settle_shift(work_time, cost);
                plan.add_resource(courier);
            }
        }
    }

    fn drain(&self, orders: &[Order], plan: &mut DayPlan) {
        for (idx, order) in orders.iter().enumerate() {
            if order.is_completed() {
                continue;
            }
            let reasons = order
                .categories()
                .iter()
                .map(|&category| (category, self.reject_reason(category, idx, orders)))
                .collect();
            plan.add_undeliverable(Undeliverable {
                order: idx,
                order_id: order.id(),
                reasons,
            });
        }
        debug!(undeliverable = plan.num_undeliverable(), "drained remaining orders");
    }

    /// Why `category` cannot take the order on its own with a fresh resource.
    fn reject_reason(&self, category: CategoryId, order: usize, orders: &[Order]) -> RejectReason {
        if !self.shop.allows(category) {
            return RejectReason::NoAvailableResource;
        }
        let Some(kind) = self.pool.category(category) else {
            return RejectReason::NoAvailableResource;
        };
        let Some(template) = self.pool.templates_for(category).next() else {
            return RejectReason::NoAvailableResource;
        };
        let fresh = template.instantiate(template.id());
        let evaluator = RouteEvaluator::new(
            orders,
            self.distances,
            &**kind,
            &fresh,
            self.config.clock(),
        );
        match evaluator.build_single(order) {
            Ok(_) => RejectReason::NoAvailableResource,
            Err(violation) => violation.reason(),
        }
    }
}

fn complete(route: &Route, orders: &mut [Order]) {
    for stop in route.stops() {
        let order = &mut orders[stop.order];
        if !order.mark_completed() {
            warn!(order = order.id(), "order already completed");
        }
    }
}
