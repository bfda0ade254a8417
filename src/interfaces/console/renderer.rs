use crate::application::commands::{Action, Command};
use crate::application::state::{AppState, StateObserver, View};
use crate::error::Result;
use std::io::Write;
use tracing::warn;

/// Writes state to a text sink: listings as CSV, messages as prefixed lines.
///
/// Listings are printed when a view is requested, the order when a
/// checkout succeeds, and a one-line summary after each basket change.
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render_view(&mut self, view: View, state: &AppState) -> Result<()> {
        match view {
            View::Products => self.render_products(state),
            View::Customers => self.render_customers(state),
            View::Basket => self.render_basket(state),
            View::Order => self.render_order(state),
        }
    }

    pub fn render_products(&mut self, state: &AppState) -> Result<()> {
        let mut writer = self.csv();
        writer.write_record(["id", "name", "price", "stock", "description"])?;
        for product in &state.products {
            writer.write_record([
                product.product_id.to_string(),
                product.name.clone(),
                product.price.to_string(),
                product.stock.to_string(),
                product.description.clone().unwrap_or_default(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn render_customers(&mut self, state: &AppState) -> Result<()> {
        let mut writer = self.csv();
        writer.write_record(["id", "name", "email", "segment", "selected"])?;
        for customer in &state.customers {
            let selected = state.selected_customer == Some(customer.customer_id);
            writer.write_record([
                customer.customer_id.to_string(),
                customer.name.clone(),
                customer.email.clone().unwrap_or_default(),
                customer.segment.clone().unwrap_or_default(),
                selected.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn render_basket(&mut self, state: &AppState) -> Result<()> {
        let mut writer = self.csv();
        writer.write_record(["product", "name", "quantity", "line_total"])?;
        for item in state.basket.items() {
            writer.write_record([
                item.product_id().to_string(),
                item.product.name.clone(),
                item.quantity().to_string(),
                item.line_total().to_string(),
            ])?;
        }
        writer.write_record([
            "total".to_string(),
            String::new(),
            state.basket.total_items().to_string(),
            state.basket.total().to_string(),
        ])?;
        writer.flush()?;
        Ok(())
    }

    pub fn render_order(&mut self, state: &AppState) -> Result<()> {
        let Some(order) = &state.order else {
            writeln!(self.out, "no order yet")?;
            return Ok(());
        };

        let mut writer = self.csv();
        writer.write_record(["order", "date", "total"])?;
        writer.write_record([
            order.order_id.map(|id| id.to_string()).unwrap_or_default(),
            order.formatted_date(),
            order.display_total().to_string(),
        ])?;
        writer.write_record(["product", "name", "quantity", "unit_price"])?;
        for line in &order.lines {
            writer.write_record([
                line.product_id.map(|id| id.to_string()).unwrap_or_default(),
                line.product_name.clone().unwrap_or_default(),
                line.quantity.to_string(),
                line.unit_price.map(|p| p.to_string()).unwrap_or_default(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn render_action(&mut self, action: &Action, state: &AppState) -> Result<()> {
        match action {
            Action::Local(Command::Show(view)) => self.render_view(*view, state)?,
            Action::Local(Command::SelectCustomer(id)) => {
                if let Some(customer) = state.customer(*id)
                    && state.selected_customer == Some(*id)
                {
                    writeln!(self.out, "selected customer: {id} ({})", customer.name)?;
                }
            }
            Action::Local(Command::DeselectCustomer) => writeln!(self.out, "no customer selected")?,
            Action::Local(_) => writeln!(
                self.out,
                "basket: {} items, total {}",
                state.basket.total_items(),
                state.basket.total()
            )?,
            Action::Checkout if state.order.is_some() => self.render_order(state)?,
            _ => {}
        }

        if let Some(error) = &state.error {
            writeln!(self.out, "error: {error}")?;
        }
        if let Some(notice) = &state.notice
            && action.is_remote()
        {
            writeln!(self.out, "notice: {notice}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn csv(&mut self) -> csv::Writer<&mut W> {
        csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut self.out)
    }
}

impl<W: Write + Send> StateObserver for ConsoleRenderer<W> {
    fn state_changed(&mut self, action: &Action, state: &AppState) {
        if let Err(e) = self.render_action(action, state) {
            warn!(error = %e, "failed to render state");
        }
    }
}
