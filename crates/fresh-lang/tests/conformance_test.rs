use fresh_core::{FreshConfig, JsonConfig, Node};
use fresh_lang::json::to_json_string;
use fresh_lang::{markup_to_fresh, markup_to_json, reindent};

const HERO_CLIP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<objects>
	<!-- Hero animation -->
	<include url="shared/textures.xml"/>
	<const type="float" name="heroSpeed">2.5</const>
	<class name="Hero" extends="MovieClip">
		<speed>4</speed>
	</class>
	<object class="MovieClip" name="hero_run">
		<texture>hero.png</texture>
		<passthrough>
			<keyframe t="0">
				<child name="arm">
					<rotation>0</rotation>
				</child>
				<tween type="QuadEaseIn"/>
			</keyframe>
			<keyframe label="stride" replay-children="true">
				<child name="arm">
					<rotation>45</rotation>
				</child>
			</keyframe>
			<keyframe/>
		</passthrough>
	</object>
</objects>
"#;

fn lines(lines: &[&str]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn to_fresh(src: &str) -> String {
    let result = markup_to_fresh(src, "conformance.xml", &FreshConfig::default())
        .expect("conversion should succeed in conformance test");
    assert!(result.is_clean(), "unexpected indentation underflow");
    result.text
}

#[test]
fn test_conformance_01_hero_clip_fresh() {
    let expected = lines(&[
        "// Hero animation ",
        "include \"shared/textures.fresh\"",
        "const float heroSpeed 2.5",
        "class Hero extends MovieClip {",
        "\tspeed \"4\"",
        "}",
        "object MovieClip hero_run {",
        "\ttexture \"hero.png\"",
        "\tpassthrough [",
        "\t\tobject keyframe {",
        "\t\t\tt \"0\"",
        "\t\t\tchildren [",
        "\t\t\t\tobject child \"arm\" {",
        "\t\t\t\t\trotation \"0\"",
        "\t\t\t\t}",
        "\t\t\t]",
        "\t\t\ttween object QuadEaseIn {",
        "\t\t\t}",
        "\t\t}",
        "\t\tobject keyframe {",
        "\t\t\tlabel \"stride\"",
        "\t\t\treplay_children \"true\"",
        "\t\t\tchildren [",
        "\t\t\t\tobject child \"arm\" {",
        "\t\t\t\t\trotation \"45\"",
        "\t\t\t\t}",
        "\t\t\t]",
        "\t\t}",
        "\t\tobject keyframe {",
        "\t\t}",
        "\t]",
        "}",
    ]);
    assert_eq!(to_fresh(HERO_CLIP), expected);
}

#[test]
fn test_conformance_02_hero_clip_json() {
    // The leading comment would make the output JSON-with-comments.
    let src = HERO_CLIP.replace("<!-- Hero animation -->", "");
    let json = markup_to_json(&src, "conformance.xml", &JsonConfig::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let items = value.as_array().expect("objects is an array");
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["@node"], "include");
    assert_eq!(items[0][".url"], "shared/textures.xml");
    assert_eq!(items[1][".name"], "heroSpeed");
    assert_eq!(items[1]["value"], "2.5");

    let clip = &items[3];
    assert_eq!(clip["texture"], "hero.png");
    let keyframes = clip["passthrough"].as_array().expect("passthrough is an array");
    assert_eq!(keyframes.len(), 3);
    assert_eq!(keyframes[0][".t"], "0");
    assert_eq!(keyframes[0]["child"][".name"], "arm");
    assert_eq!(keyframes[0]["tween"][".type"], "QuadEaseIn");
    assert_eq!(keyframes[1][".replay-children"], "true");
    assert_eq!(keyframes[2], serde_json::Value::String(String::new()));
}

#[test]
fn test_conformance_03_keyframe_label_example() {
    assert_eq!(
        to_fresh(r#"<keyframe label="jump"><x>1</x></keyframe>"#),
        lines(&[
            "object keyframe {",
            "\tlabel \"jump\"",
            "\tchildren [",
            "\t\tx \"1\"",
            "\t]",
            "}",
        ])
    );
}

#[test]
fn test_conformance_04_tween_never_inside_array() {
    let out = to_fresh(
        r#"<keyframe s="0.25"><tween type="Move"/><child name="a"/><child name="b"/></keyframe>"#,
    );
    let rows: Vec<&str> = out.lines().collect();
    let close = rows.iter().position(|l| *l == "\t]").expect("children array closes");
    let tween = rows
        .iter()
        .position(|l| l.trim_start() == "tween object Move {")
        .expect("tween emitted");
    assert_eq!(tween, close + 1);
    assert_eq!(rows[tween], "\ttween object Move {");
}

#[test]
fn test_conformance_05_reindent_idempotent_on_output() {
    let out = to_fresh(HERO_CLIP);
    let again = reindent(&out, "\t");
    assert!(again.is_clean());
    assert_eq!(again.text, out);
}

#[test]
fn test_conformance_06_json_keys_mirror_tree() {
    let trees = [
        Node::new("a").with_attribute("foo", "1").with_child(Node::new("b").with_text("hi")),
        Node::new("object")
            .with_attribute("class", "Sprite")
            .with_attribute("name", "hero")
            .with_child(Node::new("position").with_text("1,2"))
            .with_child(Node::new("scale"))
            .with_child(
                Node::new("color")
                    .with_attribute("space", "rgb")
                    .with_child(Node::new("r").with_text("1")),
            ),
        Node::new("clip").with_child(Node::new("frames")).with_child(Node::new("fps").with_text("30")),
    ];

    for tree in trees {
        let json = to_json_string(&tree, "\t").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().expect("non-array node is an object");

        let mut expected = vec!["@node".to_string()];
        expected.extend(tree.attributes.iter().map(|a| format!(".{}", a.name)));
        expected.extend(tree.children.iter().map(|c| c.name.clone()));
        let keys: Vec<String> = object.keys().cloned().collect();
        assert_eq!(keys, expected);
        assert_eq!(object["@node"], tree.name.as_str());
    }
}

#[test]
fn test_conformance_07_root_attribute_note() {
    let out = to_fresh(r#"<objects root="hero_run"><object class="A"/></objects>"#);
    assert_eq!(
        out,
        lines(&[
            "// TODO had root attribute: root=\"hero_run\"",
            "object A {",
            "}",
        ])
    );
}
