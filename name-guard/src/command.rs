//! The one-line `Name, Full Address, Radius` command syntax.

use serde::{Deserialize, Serialize};

/// Printed when a command line cannot be parsed.
pub const USAGE: &str = "Usage: /name PropertyName, Full Address, RadiusInMiles";

/// A parsed search command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCommand {
    pub name: String,
    pub address: String,
    pub radius_miles: u32,
}

/// Parses `"<Name>, <Full Address>, <RadiusInMiles>"`.
///
/// The first comma-separated part is the name and the last is a whole
/// number of miles; everything in between is the address, so addresses may
/// contain commas themselves. Returns `None` when a part is missing or the
/// radius is not a positive integer.
///
/// # Examples
///
/// ```rust
/// use name_guard::command::parse_command;
///
/// let command = parse_command("Sunset Gardens, 123 Main St, Austin, TX 78701, 5").unwrap();
/// assert_eq!(command.name, "Sunset Gardens");
/// assert_eq!(command.address, "123 Main St, Austin, TX 78701");
/// assert_eq!(command.radius_miles, 5);
///
/// assert!(parse_command("Sunset Gardens, 5").is_none());
/// ```
pub fn parse_command(text: &str) -> Option<NameCommand> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return None;
    }
    let (name, rest) = parts.split_first()?;
    let (radius, address) = rest.split_last()?;

    let radius_miles: u32 = radius.parse().ok()?;
    let address = address.join(", ");
    if name.is_empty() || address.is_empty() || radius_miles == 0 {
        return None;
    }
    Some(NameCommand {
        name: name.to_string(),
        address,
        radius_miles,
    })
}
