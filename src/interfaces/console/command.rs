use crate::application::commands::{Action, Command};
use crate::application::state::View;
use crate::domain::customer::{CustomerDraft, CustomerId};
use crate::domain::product::{ProductDraft, ProductId};
use crate::error::{Result, StorefrontError};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const HELP: &str = "\
commands:
  products | customers | basket | order      show a listing
  refresh                                    reload products and customers
  select <customer-id> | deselect            choose the checkout customer
  add|inc|dec|remove <product-id>            change the basket
  clear                                      empty the basket
  checkout                                   place the order
  new-product name=.. price=.. stock=.. [description=..] [image=..]
  delete-product <product-id>
  new-customer name=.. email=.. [address=..] [phone=..] [segment=..]
  register name=.. email=.. address=.. phone=.. segment=..
  delete-customer <customer-id>
  help | quit";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Dispatch(Action),
    Help,
    Quit,
}

/// Parses a console line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>> {
    let tokens = tokenize(line)?;
    let Some((head, args)) = tokens.split_first() else {
        return Ok(None);
    };
    if head.starts_with('#') {
        return Ok(None);
    }

    let command = match head.as_str() {
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        "products" => show(View::Products),
        "customers" => show(View::Customers),
        "basket" => show(View::Basket),
        "order" => show(View::Order),
        "refresh" => ShellCommand::Dispatch(Action::Refresh),
        "checkout" => ShellCommand::Dispatch(Action::Checkout),
        "clear" => local(Command::ClearBasket),
        "deselect" => local(Command::DeselectCustomer),
        "select" => local(Command::SelectCustomer(CustomerId(single_id(head, args)?))),
        "add" => local(Command::AddToBasket(ProductId(single_id(head, args)?))),
        "inc" => local(Command::Increase(ProductId(single_id(head, args)?))),
        "dec" => local(Command::Decrease(ProductId(single_id(head, args)?))),
        "remove" => local(Command::Remove(ProductId(single_id(head, args)?))),
        "delete-product" => {
            ShellCommand::Dispatch(Action::DeleteProduct(ProductId(single_id(head, args)?)))
        }
        "delete-customer" => {
            ShellCommand::Dispatch(Action::DeleteCustomer(CustomerId(single_id(head, args)?)))
        }
        "new-product" => ShellCommand::Dispatch(Action::CreateProduct(product_draft(args)?)),
        "new-customer" => ShellCommand::Dispatch(Action::CreateCustomer(customer_draft(args)?)),
        "register" => ShellCommand::Dispatch(Action::RegisterCustomer(customer_draft(args)?)),
        other => return Err(invalid(format!("Unknown command: {other}. Type 'help'."))),
    };
    Ok(Some(command))
}

fn show(view: View) -> ShellCommand {
    local(Command::Show(view))
}

fn local(command: Command) -> ShellCommand {
    ShellCommand::Dispatch(Action::Local(command))
}

fn invalid(message: String) -> StorefrontError {
    StorefrontError::ValidationError(message)
}

fn single_id(command: &str, args: &[String]) -> Result<i64> {
    match args {
        [id] => id
            .parse()
            .map_err(|_| invalid(format!("'{command}' expects a numeric id, got {id:?}."))),
        _ => Err(invalid(format!("'{command}' expects exactly one id."))),
    }
}

/// Splits `key=value` arguments.
fn fields(args: &[String]) -> Result<Vec<(&str, &str)>> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .ok_or_else(|| invalid(format!("Expected key=value, got {arg:?}.")))
        })
        .collect()
}

fn unknown_field(key: &str, allowed: &[&str]) -> StorefrontError {
    invalid(format!(
        "Unknown field {key:?}; expected one of {}.",
        allowed.join(", ")
    ))
}

const PRODUCT_FIELDS: [&str; 5] = ["name", "price", "stock", "description", "image"];
const CUSTOMER_FIELDS: [&str; 5] = ["name", "email", "address", "phone", "segment"];

fn product_draft(args: &[String]) -> Result<ProductDraft> {
    let mut draft = ProductDraft::default();
    for (key, value) in fields(args)? {
        match key {
            "name" => draft.name = value.to_string(),
            "description" => draft.description = value.to_string(),
            "image" => draft.image_path = Some(value.to_string()),
            "price" => {
                draft.price = Decimal::from_str(value)
                    .map_err(|_| invalid(format!("Price must be a number, got {value:?}.")))?
            }
            "stock" => {
                draft.stock = value
                    .parse()
                    .map_err(|_| invalid(format!("Stock must be a whole number, got {value:?}.")))?
            }
            other => return Err(unknown_field(other, &PRODUCT_FIELDS)),
        }
    }
    Ok(draft)
}

fn customer_draft(args: &[String]) -> Result<CustomerDraft> {
    let mut draft = CustomerDraft::default();
    for (key, value) in fields(args)? {
        let slot = match key {
            "name" => &mut draft.name,
            "email" => &mut draft.email,
            "address" => &mut draft.address,
            "phone" => &mut draft.phone_number,
            "segment" => &mut draft.segment,
            other => return Err(unknown_field(other, &CUSTOMER_FIELDS)),
        };
        *slot = value.to_string();
    }
    Ok(draft)
}

/// Whitespace splitting with double-quoted segments.
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if quoted {
        return Err(invalid("Unterminated quote.".to_string()));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
