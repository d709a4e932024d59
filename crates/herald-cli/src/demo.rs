//! Built-in demo commands
//!
//! A small shop, a guild and an engine status command, registered the three
//! ways the engine supports: a callback table, a method set bound to one
//! shared instance, and a single direct registration.

use anyhow::anyhow;
use herald_core::commands::{
    CommandDescriptor, CommandEngine, CommandMethod, CommandSet, CommandSpec, CommandTable,
    HandlerBinding, HandlerResult, MethodSignature, SenderArg,
};
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::{Arc, Weak};
use std::thread;
use std::time::Duration;

/// Owner id all demo commands are registered under
pub const DEMO_OWNER: &str = "demo";

const ITEMS: [&str; 4] = ["diamond", "emerald", "gold", "iron"];
const ONLINE: [&str; 3] = ["Alex", "Notch", "Steve"];

/// Register every demo command; returns how many were registered
pub fn register(engine: &Arc<CommandEngine>) -> anyhow::Result<usize> {
    let registry = engine.registry();
    let mut count = shop_table().register_owned_into(registry, DEMO_OWNER)?;

    let guild = Arc::new(Guild::new("Wanderers"));
    count += registry.register_all(DEMO_OWNER, guild)?;
    registry.set_completer("guild", complete_guild);

    registry.register_owned(
        DEMO_OWNER,
        CommandDescriptor::new("herald status")
            .with_description("Show engine status")
            .asynchronous(),
        status_command(Arc::downgrade(engine)),
    )?;
    count += 1;

    Ok(count)
}

fn shop_table() -> CommandTable {
    CommandTable::new()
        .command("shop", |sender, _args| {
            sender.send_message(&format!("For sale: {}", ITEMS.join(", ")));
            Ok(())
        })
        .description("List items for sale")
        .sub("shop", "buy", |sender, args| {
            let Some(item) = args.first() else {
                sender.send_message("Usage: /shop buy <item> [amount]");
                return Ok(());
            };
            let amount: u32 = match args.get(1) {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| anyhow!("'{raw}' is not a valid amount"))?,
                None => 1,
            };
            sender.send_message(&format!("Bought {amount} x {}", item.to_lowercase()));
            Ok(())
        })
        .permission("shop.buy")
        .usage("/shop buy <item> [amount]")
        .description("Buy an item")
        .sub("shop", "sell", |sender, args| {
            let Some(item) = args.first() else {
                sender.send_message("Usage: /shop sell <item>");
                return Ok(());
            };
            // Appraisal takes a while; runs on the worker pool
            thread::sleep(Duration::from_millis(750));
            sender.send_message(&format!("Sold {} for 12 coins", item.to_lowercase()));
            Ok(())
        })
        .permission("shop.sell")
        .usage("/shop sell <item>")
        .description("Sell an item")
        .asynchronous()
        .command("herald ping", |sender, _args| {
            sender.send_message("pong");
            Ok(())
        })
        .description("Check that the engine answers")
}

fn status_command(engine: Weak<CommandEngine>) -> HandlerBinding {
    HandlerBinding::callback(move |sender, _args| {
        let engine = engine
            .upgrade()
            .ok_or_else(|| anyhow!("engine is gone"))?;
        let stats = engine.completion_cache().stats();
        sender.send_message(&format!(
            "{} commands, {} async in flight, completion cache {}",
            engine.registry().len(),
            engine.in_flight(),
            stats.summary()
        ));
        Ok(())
    })
}

fn complete_guild(
    _sender: &dyn herald_core::sender::CommandSender,
    _label: &str,
    args: &[String],
) -> Vec<String> {
    let candidates: &[&str] = match args {
        [_] => &["info", "invite", "leave"],
        [head, _] if head.eq_ignore_ascii_case("invite") => &ONLINE,
        _ => &[],
    };
    let partial = args.last().map(|p| p.to_lowercase()).unwrap_or_default();
    candidates
        .iter()
        .filter(|c| c.to_lowercase().starts_with(&partial))
        .map(|c| c.to_string())
        .collect()
}

/// A guild whose handlers share one member list
pub struct Guild {
    name: String,
    members: RwLock<BTreeSet<String>>,
}

impl Guild {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: RwLock::new(BTreeSet::new()),
        }
    }

    fn info(&self, sender: SenderArg<'_>, _args: &[String]) -> HandlerResult {
        let SenderArg::Context(context) = sender else {
            return Err(anyhow!("info expects a context"));
        };
        let members = self.members.read();
        let listing = if members.is_empty() {
            "nobody yet".to_string()
        } else {
            members.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        context.reply(format!(
            "{} ({} members): {listing}",
            self.name,
            members.len()
        ));
        Ok(())
    }

    fn invite(&self, sender: SenderArg<'_>, args: &[String]) -> HandlerResult {
        let SenderArg::Interactive(player) = sender else {
            return Err(anyhow!("invite expects a player"));
        };
        let Some(target) = args.first() else {
            player.send_message("Usage: /guild invite <player>");
            return Ok(());
        };
        if self.members.write().insert(target.clone()) {
            player.send_message(&format!("{} invited {target} to {}", player.name(), self.name));
        } else {
            player.send_message(&format!("{target} is already a member"));
        }
        Ok(())
    }

    fn leave(&self, sender: SenderArg<'_>, _args: &[String]) -> HandlerResult {
        let SenderArg::Interactive(player) = sender else {
            return Err(anyhow!("leave expects a player"));
        };
        if self.members.write().remove(player.name()) {
            player.send_message(&format!("You left {}", self.name));
        } else {
            player.send_message(&format!("You are not in {} ({})", self.name, player.unique_id()));
        }
        Ok(())
    }
}

impl CommandSet for Guild {
    fn commands() -> Vec<CommandMethod<Self>> {
        vec![
            CommandMethod::new(
                CommandSpec::new("guild").with_description("Show the guild"),
                MethodSignature::context("info"),
                Guild::info,
            ),
            CommandMethod::new(
                CommandSpec::sub("guild", "invite")
                    .with_permission("guild.invite")
                    .with_usage("/guild invite <player>")
                    .with_description("Invite a player"),
                MethodSignature::interactive("invite"),
                Guild::invite,
            ),
            CommandMethod::new(
                CommandSpec::sub("guild", "leave").with_description("Leave the guild"),
                MethodSignature::interactive("leave"),
                Guild::leave,
            ),
        ]
    }
}
