//! Visitor End-to-End Tests - Lifecycle, Recursion, Chaining
//!
//! Full traversals over a three-level document tree: handlers recurse
//! through the walker, the lifecycle hooks shape the run, and chains
//! thread one working tree through several visitors.

use once_cell::sync::Lazy;

use arbor::{
    Chain, HandlerSet, Kind, Node, Output, Registry, Value, VisitError, Visitor, Walker,
};

/// document → section → title/body text lists, with some inline nodes.
fn sample_document() -> Node {
    let mut title_a = Node::title();
    title_a.push(Node::text("Intro")).unwrap();
    let mut body_a = Node::body();
    body_a.push(Node::text("Hello ")).unwrap();
    body_a.push(Node::emphasis(Node::text("brave "))).unwrap();
    body_a.push(Node::text("world. ")).unwrap();

    let mut title_b = Node::title();
    title_b.push(Node::text("Outro")).unwrap();
    let mut body_b = Node::body();
    body_b.push(Node::text("Bye.")).unwrap();

    let mut document = Node::document();
    document.push(Node::section(title_a, body_a)).unwrap();
    document.push(Node::section(title_b, body_b)).unwrap();
    document
}

/// Concatenates all text in document order. Handlers are declared only
/// for the list capability and the text leaf; every other kind (sections,
/// emphasis, urls) goes through the `visit_not_found` override, which
/// descends generically.
struct TextCollector;

impl TextCollector {
    fn concat_children(
        &mut self,
        walker: &Walker<'_>,
        node: &mut Node,
    ) -> Result<Output, VisitError> {
        let mut collected = String::new();
        let mut index = 0;
        while index < node.size() {
            let output = walker.dispatch(self, node.get_mut(index)?)?;
            if let Output::Value(Value::Str(text)) = output {
                collected.push_str(&text);
            }
            index += 1;
        }
        Ok(Output::Value(Value::Str(collected)))
    }

    fn visit_list(&mut self, walker: &Walker<'_>, node: &mut Node) -> Result<Output, VisitError> {
        self.concat_children(walker, node)
    }

    fn visit_text(&mut self, _walker: &Walker<'_>, node: &mut Node) -> Result<Output, VisitError> {
        Ok(Output::Value(Value::Str(
            node.as_text().unwrap_or_default().to_string(),
        )))
    }
}

impl Visitor for TextCollector {
    fn handlers() -> &'static HandlerSet<Self> {
        static HANDLERS: Lazy<HandlerSet<TextCollector>> = Lazy::new(|| {
            HandlerSet::new()
                .on(Kind::ListNode, TextCollector::visit_list)
                .on(Kind::Text, TextCollector::visit_text)
        });
        &HANDLERS
    }

    fn visit_not_found(
        &mut self,
        walker: &Walker<'_>,
        node: &mut Node,
    ) -> Result<Output, VisitError> {
        self.concat_children(walker, node)
    }
}

/// In-place transformer: uppercases every text payload and hands the
/// mutated tree back out through `after`.
struct UpperCaser;

impl UpperCaser {
    fn visit_any(&mut self, walker: &Walker<'_>, node: &mut Node) -> Result<Output, VisitError> {
        if let Some(payload) = node.as_text() {
            let upper = payload.to_uppercase();
            node.set_text(upper)?;
        }
        let mut index = 0;
        while index < node.size() {
            walker.dispatch(self, node.get_mut(index)?)?;
            index += 1;
        }
        Ok(Output::Unit)
    }
}

impl Visitor for UpperCaser {
    fn handlers() -> &'static HandlerSet<Self> {
        static HANDLERS: Lazy<HandlerSet<UpperCaser>> =
            Lazy::new(|| HandlerSet::new().on(Kind::AnyNode, UpperCaser::visit_any));
        &HANDLERS
    }

    fn after(&mut self, root: Node, _output: Output) -> Result<Output, VisitError> {
        Ok(Output::Node(root))
    }
}

/// Short-circuits childless roots before any dispatch happens.
struct SkipEmpty {
    dispatched: bool,
}

impl Visitor for SkipEmpty {
    fn handlers() -> &'static HandlerSet<Self> {
        static HANDLERS: Lazy<HandlerSet<SkipEmpty>> =
            Lazy::new(|| HandlerSet::new().on(Kind::AnyNode, |v: &mut SkipEmpty, _, _| {
                v.dispatched = true;
                Ok(Output::Unit)
            }));
        &HANDLERS
    }

    fn before(&mut self, root: Node) -> Result<Option<Node>, VisitError> {
        if root.is_empty() {
            Ok(None)
        } else {
            Ok(Some(root))
        }
    }
}

/// Fails on text leaves; lists recurse.
struct TextHater;

impl Visitor for TextHater {
    fn handlers() -> &'static HandlerSet<Self> {
        static HANDLERS: Lazy<HandlerSet<TextHater>> = Lazy::new(|| {
            HandlerSet::new()
                .on(Kind::ListNode, |v: &mut TextHater, walker: &Walker<'_>, node: &mut Node| {
                    let mut index = 0;
                    while index < node.size() {
                        walker.dispatch(v, node.get_mut(index)?)?;
                        index += 1;
                    }
                    Ok(Output::Unit)
                })
                .on(Kind::Text, |_, _, _: &mut Node| {
                    Err(VisitError::handler("no text allowed"))
                })
        });
        &HANDLERS
    }
}

#[test]
fn test_depth_first_text_concatenation() {
    let registry = Registry::new();
    let walker = registry.walker();
    let output = walker.run(&mut TextCollector, sample_document()).unwrap();
    assert_eq!(
        output.as_value(),
        Some(&Value::Str("IntroHello brave world. OutroBye.".into()))
    );
}

#[test]
fn test_before_aborts_without_dispatching() {
    let registry = Registry::new();
    let walker = registry.walker();
    let mut visitor = SkipEmpty { dispatched: false };
    let output = walker.run(&mut visitor, Node::document()).unwrap();
    assert!(matches!(output, Output::Unit));
    assert!(!visitor.dispatched);

    let mut list = Node::document();
    list.push(Node::text("x")).unwrap();
    let _ = walker.run(&mut visitor, list).unwrap();
    assert!(visitor.dispatched);
}

#[test]
fn test_handler_error_is_classified_once() {
    let registry = Registry::new();
    let walker = registry.walker();
    let err = walker.run(&mut TextHater, sample_document()).unwrap_err();
    match err {
        VisitError::Visiting { kind, source, .. } => {
            // The wrapper names the node whose handler failed, and the
            // original cause survives unnested even though the error
            // crossed several dispatch boundaries on the way out.
            assert_eq!(kind, "text");
            assert_eq!(*source, VisitError::Handler("no text allowed".into()));
        }
        other => panic!("expected Visiting, got {other:?}"),
    }
}

#[test]
fn test_chain_threads_tree_through_visitors() {
    let registry = Registry::new();
    let walker = registry.walker();
    let mut upper = UpperCaser;
    let mut collector = TextCollector;
    let mut chain = Chain::new().then(&mut upper).then(&mut collector);
    let output = chain.run(&walker, sample_document()).unwrap();
    assert_eq!(
        output.as_value(),
        Some(&Value::Str("INTROHELLO BRAVE WORLD. OUTROBYE.".into()))
    );
}

#[test]
fn test_chain_stops_at_first_non_node_output() {
    let registry = Registry::new();
    let walker = registry.walker();
    let mut collector = TextCollector;
    let mut upper = UpperCaser;
    // The collector yields a value, so the second stage never runs and
    // the value is the chain's output.
    let mut chain = Chain::new().then(&mut collector).then(&mut upper);
    let output = chain.run(&walker, sample_document()).unwrap();
    assert_eq!(
        output.as_value(),
        Some(&Value::Str("IntroHello brave world. OutroBye.".into()))
    );
}

#[test]
fn test_chain_of_transformers_keeps_final_tree() {
    let registry = Registry::new();
    let walker = registry.walker();
    let mut upper = UpperCaser;
    let mut chain = Chain::new().then(&mut upper);
    let output = chain.run(&walker, sample_document()).unwrap();
    let tree = output.into_node().expect("transformer returns the tree");
    let text = registry
        .walker()
        .run(&mut TextCollector, tree)
        .unwrap();
    assert_eq!(
        text.as_value(),
        Some(&Value::Str("INTROHELLO BRAVE WORLD. OUTROBYE.".into()))
    );
}

#[test]
fn test_shared_registry_serves_many_visitor_kinds() {
    let registry = Registry::new();
    let walker = registry.walker();
    let _ = walker.run(&mut TextCollector, sample_document()).unwrap();
    let _ = walker.run(&mut UpperCaser, sample_document()).unwrap();
    let _ = walker.run(&mut TextCollector, sample_document()).unwrap();
    // Entries for both visitor kinds coexist.
    assert!(registry.len() >= 2);
}
