use super::*;
use crate::{MethodDecl, MethodDesc, NamedPlaceholders};
use lingo_types::{Component, Message, Reflect, TypeDesc, Value};
use pretty_assertions::assert_eq;

struct User {
    name: &'static str,
}

impl Reflect for User {
    fn type_desc() -> TypeDesc {
        TypeDesc::named("User")
    }

    fn stringify(&self) -> String {
        self.name.to_owned()
    }
}

fn interface() -> Arc<Interface> {
    Interface::builder("Messages")
        .method(
            MethodDecl::new("welcome")
                .param("user", TypeDesc::named("User"))
                .key("welcome"),
        )
        .method(
            MethodDecl::new("welcomeAll")
                .param("users", TypeDesc::list(TypeDesc::named("User")))
                .returns(TypeDesc::string()),
        )
        .build()
        .unwrap()
}

#[test]
fn defaults() {
    let proxy = ProxyBuilder::new(interface()).build();
    let message = proxy
        .call_as::<Message>("welcome", &[Some(Value::new(User { name: "Ada" }))])
        .unwrap();
    assert_eq!(message.args(), &[Component::text("Ada")]);

    // `welcomeAll` declares no key
    assert!(proxy.call("welcomeAll", &[Some(Value::new(Vec::<String>::new()))]).is_err());
}

#[test]
fn arguments_with_transform() {
    let proxy = Proxy::builder(interface())
        .arguments_with(
            |handlers| {
                handlers.add(|user: &User| Component::text(user.name.to_uppercase()));
            },
            NamedPlaceholders::new(),
        )
        .build();
    let message = proxy
        .call_as::<Message>("welcome", &[Some(Value::new(User { name: "Ada" }))])
        .unwrap();
    assert_eq!(
        message.args(),
        &[Component::placeholder("user", Component::text("ADA"))]
    );
}

#[test]
fn keys_results_and_hierarchy() {
    let proxy = Proxy::builder(interface())
        .keys(|method: &MethodDesc| -> Option<String> { Some(format!("k.{}", method.name())) })
        .results(|handlers| {
            handlers.add(|_: &MethodDesc, message: Message| {
                format!("{}/{}", message.key(), message.args().len())
            });
        })
        .hierarchy(TypeHierarchy::standard_builder().extends("Guest", "User").build())
        .build();

    let text = proxy
        .call_as::<String>(
            "welcomeAll",
            &[Some(Value::with_type(
                TypeDesc::list(TypeDesc::named("User")),
                Vec::<String>::new(),
            ))],
        )
        .unwrap();
    assert_eq!(text, "k.welcomeAll/1");

    // list arguments are invariant
    let guests = Value::with_type(TypeDesc::list(TypeDesc::named("Guest")), Vec::<String>::new());
    assert!(proxy.call("welcomeAll", &[Some(guests)]).is_err());

    let guest = Value::with_type(TypeDesc::named("Guest"), String::from("visitor"));
    let message = proxy.call_as::<Message>("welcome", &[Some(guest)]).unwrap();
    assert_eq!(message.key(), "k.welcome");
    assert_eq!(message.args(), &[Component::text("visitor")]);
}
