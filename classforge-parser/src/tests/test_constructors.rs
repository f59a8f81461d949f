use crate::ast::*;
use crate::parse_header;

fn only_class(input: &str) -> ClassDecl {
    let mut header = parse_header(input).unwrap();
    assert_eq!(header.classes.len(), 1);
    header.classes.remove(0)
}

#[test]
fn test_constructor_parameters_and_defaults() {
    let class = only_class(
        r#"
class Widget {
public:
    Widget(const std::string& label, int width = 10, double scale = 1.5f) {}
};
"#,
    );

    let ctor = &class.constructors[0];
    assert_eq!(ctor.params.len(), 3);
    assert_eq!(ctor.params[0].ty.to_string(), "const std::string &");
    assert_eq!(ctor.params[0].name.as_deref(), Some("label"));
    assert_eq!(ctor.params[0].default, None);
    assert_eq!(ctor.params[1].default.as_deref(), Some("10"));
    assert_eq!(ctor.params[2].default.as_deref(), Some("1.5f"));
}

#[test]
fn test_destructors_methods_and_operators_are_not_constructors() {
    let class = only_class(
        r#"
class Widget {
public:
    Widget() = default;
    ~Widget() {}
    Widget& operator=(const Widget& other) = default;
    operator bool() const { return true; }
    static Widget make(int size);
    void resize(int size);
};
"#,
    );

    assert_eq!(class.constructors.len(), 1);
    assert!(class.constructors[0].params.is_empty());
}

#[test]
fn test_access_labels_apply_to_following_constructors() {
    let class = only_class(
        r#"
class Gate {
public:
    Gate(int a) {}
protected:
    Gate(int a, int b) {}
private:
    Gate(int a, int b, int c) {}
public:
    explicit Gate(double d);
};
"#,
    );

    let access: Vec<_> = class.constructors.iter().map(|c| c.access).collect();
    assert_eq!(
        access,
        vec![Access::Public, Access::Protected, Access::Private, Access::Public]
    );
    assert!(class.constructors[3].is_explicit);
}

#[test]
fn test_deleted_constructors_are_flagged() {
    let class = only_class(
        r#"
class Once {
public:
    Once(int id) {}
    Once(const Once&) = delete;
    Once(Once&&) noexcept = default;
};
"#,
    );

    assert_eq!(class.constructors.len(), 3);
    assert!(!class.constructors[0].is_deleted);
    assert!(class.constructors[1].is_deleted);
    assert!(!class.constructors[2].is_deleted);
    assert_eq!(class.constructors[1].params[0].name, None);
}

#[test]
fn test_member_initializers_and_bodies_are_skipped() {
    let class = only_class(
        r#"
template <typename T>
class List : public Container<T> {
public:
    List(std::vector<T*> items, bool sorted = false)
        : Container<T>(), items_{items}, sorted_(sorted) {
        if (sorted_) { sort(); }
    }
private:
    std::vector<T*> items_;
    bool sorted_;
};
"#,
    );

    let ctor = &class.constructors[0];
    assert_eq!(ctor.params.len(), 2);
    assert_eq!(ctor.params[0].ty.to_string(), "std::vector<T *>");
    assert_eq!(ctor.params[1].default.as_deref(), Some("false"));
}

#[test]
fn test_void_parameter_list_is_empty() {
    let class = only_class("struct Empty { Empty(void) {} };");
    assert!(class.constructors[0].params.is_empty());
}

#[test]
fn test_pure_virtual_with_qualifiers_marks_abstract() {
    let class = only_class(
        r#"
class Visitor {
public:
    virtual void visit(Node& node) const noexcept = 0;
};
"#,
    );

    assert!(class.is_abstract);
    assert!(class.constructors.is_empty());
}

#[test]
fn test_default_values_are_whitespace_normalized() {
    let class = only_class(
        r#"
struct Config {
    Config(std::string name = std::string( "x" ), int n = - 1) {}
};
"#,
    );

    let params = &class.constructors[0].params;
    assert_eq!(params[0].default.as_deref(), Some(r#"std::string( "x" )"#));
    assert_eq!(params[1].default.as_deref(), Some("- 1"));
}
