//! Tests for command types

use super::*;
use crate::error::{ArgumentError, RegistrationError};
use crate::sender::{CommandSender, MemorySender};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_path_normalization() {
    let path = CommandPath::parse("  Guild   INVITE ").unwrap();
    assert_eq!(path.as_str(), "guild invite");
    assert_eq!(path.root(), "guild");
    assert_eq!(path.sub_head(), Some("invite"));
    assert_eq!(path.depth(), 2);
    assert!(path.is_under("guild"));
}

#[test]
fn test_path_rejects_blank() {
    assert_eq!(
        CommandPath::parse("   "),
        Err(RegistrationError::invalid_path("   "))
    );
    assert!(CommandPath::parse("").is_err());
}

#[test]
fn test_path_from_parts() {
    assert_eq!(
        CommandPath::from_parts("guild", "Invite").unwrap().as_str(),
        "guild invite"
    );
    assert_eq!(CommandPath::from_parts("", "shop").unwrap().as_str(), "shop");
    assert!(CommandPath::from_parts("guild", " ").is_err());

    let root = CommandPath::parse("shop").unwrap();
    assert_eq!(root.child("buy").unwrap().as_str(), "shop buy");
    assert_eq!(root.sub_head(), None);
}

#[test]
fn test_descriptor_defaults() {
    let descriptor = CommandDescriptor::new("shop buy");
    assert!(descriptor.is_public());
    assert!(!descriptor.is_async);
    assert_eq!(descriptor.display_usage(), "/shop buy");

    let descriptor = descriptor
        .with_permission("shop.buy")
        .with_usage("/shop buy <item> [amount]")
        .with_description("Buy an item")
        .asynchronous();
    assert!(!descriptor.is_public());
    assert!(descriptor.is_async);
    assert_eq!(descriptor.display_usage(), "/shop buy <item> [amount]");
}

#[test]
fn test_signature_validation() {
    assert_eq!(
        MethodSignature::sender("balance").validate(),
        Ok(SenderRequirement::AnySender)
    );
    assert_eq!(
        MethodSignature::interactive("home").validate(),
        Ok(SenderRequirement::InteractiveOnly)
    );
    assert_eq!(
        MethodSignature::context("pay").validate(),
        Ok(SenderRequirement::ContextWrapped)
    );

    let too_many = MethodSignature::new(
        "broken",
        vec![ParamKind::AnySender, ParamKind::StringArray, ParamKind::StringArray],
    );
    assert!(too_many.validate().unwrap_err().contains("exactly 2"));

    let wrong_first = MethodSignature::new(
        "broken",
        vec![ParamKind::Other("int"), ParamKind::StringArray],
    );
    assert!(wrong_first.validate().unwrap_err().contains("found int"));

    let wrong_second =
        MethodSignature::new("broken", vec![ParamKind::AnySender, ParamKind::Context]);
    assert!(wrong_second.validate().unwrap_err().contains("second parameter"));
}

#[test]
fn test_callback_binding_runs() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let binding = HandlerBinding::callback(move |_sender, args| {
        counter.fetch_add(args.len(), Ordering::SeqCst);
        Ok(())
    });

    let sender = MemorySender::new("alex");
    binding.call(&sender, "shop", &args(&["a", "b"])).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(binding.requirement(), SenderRequirement::AnySender);
    assert_eq!(binding.kind(), "callback");
}

#[test]
fn test_player_adapter_requires_interactive() {
    let binding = HandlerBinding::player(|player, _args| {
        player.send_message(&format!("hi {}", player.unique_id()));
        Ok(())
    });
    assert_eq!(binding.requirement(), SenderRequirement::InteractiveOnly);

    let console = MemorySender::new("console");
    assert!(binding.call(&console, "home", &[]).is_err());

    let player = MemorySender::player("Steve");
    binding.call(&player, "home", &[]).unwrap();
    assert!(player.last_message().unwrap().starts_with("hi "));
}

struct Bank {
    fee: i64,
}

impl Bank {
    fn pay(&self, sender: SenderArg<'_>, _args: &[String]) -> HandlerResult {
        let SenderArg::Context(context) = sender else {
            anyhow::bail!("expected a context");
        };
        let amount: i64 = context.parse_arg(1)?;
        context.reply(format!(
            "paid {} to {}",
            amount - self.fee,
            context.require_arg(0)?
        ));
        Ok(())
    }
}

#[test]
fn test_bound_method_with_context() {
    let bank = Arc::new(Bank { fee: 1 });
    let method = BoundMethod::new(Arc::clone(&bank), MethodSignature::context("pay"), Bank::pay);
    assert_eq!(method.target::<Bank>().map(|b| b.fee), Some(1));
    assert!(method.target_type().ends_with("Bank"));

    let binding = HandlerBinding::method(method);
    assert_eq!(binding.requirement(), SenderRequirement::ContextWrapped);

    let sender = MemorySender::new("alex");
    binding.call(&sender, "bank", &args(&["steve", "10"])).unwrap();
    assert_eq!(sender.last_message().as_deref(), Some("paid 9 to steve"));

    assert!(binding.call(&sender, "bank", &args(&["steve", "ten"])).is_err());
}

#[test]
fn test_context_accessors() {
    let sender = MemorySender::player("Steve");
    let values = args(&["set", "spawn", "point", "42"]);
    let context = CommandContext::new(&sender, "Warp", &values);

    assert_eq!(context.label(), "Warp");
    assert_eq!(context.arg(0), Some("set"));
    assert_eq!(context.arg(9), None);
    assert_eq!(context.arg_or(9, "default"), "default");
    assert_eq!(context.joined_from(1), "spawn point 42");
    assert_eq!(context.joined_from(10), "");
    assert_eq!(context.parse_arg::<u32>(3), Ok(42));
    assert_eq!(
        context.parse_arg::<u32>(0),
        Err(ArgumentError::Invalid {
            index: 0,
            value: "set".to_string(),
            expected: "u32",
        })
    );
    assert_eq!(context.require_arg(4), Err(ArgumentError::Missing { index: 4 }));
    assert!(context.is_interactive());
}
