//! One proxy shared by many threads.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use lingo_proxy::{
    Component, DerivedKeys, Interface, Message, MethodDecl, MethodDesc, Proxy, TypeDesc, Value,
};
use pretty_assertions::assert_eq;

const THREADS: usize = 8;
const ROUNDS: usize = 50;

fn messages() -> Arc<Interface> {
    Interface::builder("Messages")
        .method(
            MethodDecl::new("helloWorld")
                .param("name", TypeDesc::string())
                .returns(TypeDesc::string()),
        )
        .method(MethodDecl::new("errors").returns(TypeDesc::named("Errors")))
        .nested(
            Interface::builder("Errors")
                .method(MethodDecl::new("notFound").param("path", TypeDesc::string())),
        )
        .build()
        .unwrap()
}

#[test]
fn racing_callers_share_one_child_and_one_key() {
    let derivations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&derivations);
    let derived = DerivedKeys::new();

    let proxy = Proxy::builder(messages())
        .keys(move |method: &MethodDesc| -> Option<String> {
            counter.fetch_add(1, Ordering::Relaxed);
            Some(derived.derive(method))
        })
        .results(|handlers| {
            handlers.add(|_: &MethodDesc, message: Message| {
                let args: Vec<String> = message.args().iter().map(Component::to_string).collect();
                format!("{}[{}]", message.key(), args.join(","))
            });
        })
        .build();

    let children: Vec<Proxy> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|worker| {
                let proxy = &proxy;
                scope.spawn(move || {
                    let mut child = None;
                    for round in 0..ROUNDS {
                        let name = format!("w{worker}r{round}");
                        let text = proxy
                            .call_as::<String>("helloWorld", &[Some(Value::new(name.clone()))])
                            .unwrap();
                        assert_eq!(text, format!("hello.world[{name}]"));

                        let errors = proxy.child("errors").unwrap();
                        let message = errors
                            .call_as::<Message>("notFound", &[Some(Value::new("/"))])
                            .unwrap();
                        assert_eq!(message.key(), "errors.not.found");
                        child = Some(errors);
                    }
                    child.unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for child in &children {
        assert_eq!(child, &children[0]);
    }
    // Racing first calls may each derive a key, but the cache stops that
    // once filled: far fewer derivations than calls.
    let calls = THREADS * ROUNDS * 2;
    assert!(derivations.load(Ordering::Relaxed) <= THREADS * 2);
    assert!(derivations.load(Ordering::Relaxed) < calls);
}

#[test]
fn proxy_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Proxy>();
    assert_send_sync::<Value>();
}
