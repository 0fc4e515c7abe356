use super::*;

// === Reserved word tests ===

#[test]
fn control_flow_words() {
    for word in [
        "if", "else", "switch", "case", "default", "for", "while", "do", "break", "continue",
        "try", "catch", "finally", "throw", "assert",
    ] {
        assert_eq!(lookup(word), Some(TokenKind::KeywordControl), "{word}");
    }
}

#[test]
fn special_classes() {
    assert_eq!(lookup("return"), Some(TokenKind::KeywordReturn));
    assert_eq!(lookup("new"), Some(TokenKind::KeywordNew));
    assert_eq!(lookup("this"), Some(TokenKind::KeywordThis));
    assert_eq!(lookup("super"), Some(TokenKind::KeywordThis));
    assert_eq!(lookup("true"), Some(TokenKind::BooleanLiteral));
    assert_eq!(lookup("false"), Some(TokenKind::BooleanLiteral));
    assert_eq!(lookup("null"), Some(TokenKind::NullLiteral));
}

#[test]
fn declaration_and_type_words() {
    for word in [
        "_", "int", "byte", "char", "enum", "goto", "long", "void", "class", "const", "final",
        "float", "short", "double", "import", "native", "public", "static", "throws",
        "boolean", "extends", "package", "private", "abstract", "strictfp", "volatile",
        "interface", "protected", "transient", "implements", "instanceof", "synchronized",
    ] {
        assert_eq!(lookup(word), Some(TokenKind::Keyword), "{word}");
    }
}

#[test]
fn identifiers_are_not_keywords() {
    for word in ["foo", "Int", "IF", "classes", "x", "$", "__", "String", "synchronizedX"] {
        assert_eq!(lookup(word), None, "{word}");
    }
    assert_eq!(lookup(""), None);
}

// === Restricted word tests ===

#[test]
fn restricted_words_stay_out_of_reserved_table() {
    for word in [
        "module", "open", "requires", "exports", "opens", "uses", "provides", "transitive",
        "to", "with", "record", "var", "yield", "sealed", "permits",
    ] {
        assert_eq!(lookup(word), None, "{word}");
    }
}

#[test]
fn module_directives() {
    for word in [
        "requires", "exports", "opens", "uses", "provides", "transitive", "to", "with",
    ] {
        assert!(is_module_directive(word), "{word}");
    }
    assert!(!is_module_directive("module"));
    assert!(!is_module_directive("open"));
}

#[test]
fn helper_tables() {
    assert!(is_primitive_type("int"));
    assert!(!is_primitive_type("void"));
    assert!(is_declaration_modifier("static"));
    assert!(!is_declaration_modifier("class"));
    assert_eq!(type_declaration_body("record"), Some(DeclarationBody::Class));
    assert_eq!(type_declaration_body("enum"), Some(DeclarationBody::Enum));
    assert_eq!(
        type_declaration_body("interface"),
        Some(DeclarationBody::Interface)
    );
    assert_eq!(type_declaration_body("module"), None);
}
