//! Prompt templates for the stance pipeline

use crate::persona::{Persona, PersonaCatalog};
use crate::stance::{MAX_STANCE_CHARS, PositionPair};
use crate::topic::MAX_TITLE_CHARS;

/// Suggested length of a persona's reason. Not enforced on the reply.
const REASON_HINT_CHARS: usize = 20;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt shared by every stage
    pub fn system() -> &'static str {
        r#"你是一位辩论专家和哲学顾问。
你只输出一个 JSON 对象，不要输出任何解释、前言或 Markdown 标记。"#
    }

    /// Condense a long topic into a short title
    pub fn condense_topic(topic: &str) -> String {
        format!(
            r#"请把下面的辩题凝练成一个简短的标题。

辩题："{topic}"

要求：
- 不超过{max}个字
- 保留核心争议点，尽量使用疑问句

以 JSON 返回：{{"refined_topic": "凝练后的标题"}}"#,
            topic = topic,
            max = MAX_TITLE_CHARS,
        )
    }

    /// Generate the two opposing positions for a title
    pub fn stances(title: &str) -> String {
        format!(
            r#"针对辩题"{title}"，请给出正反双方的立场。

要求：
- 正方立场支持辩题中的观点，不超过{max}个字
- 反方立场反对辩题中的观点，不超过{max}个字
- 双方立场必须明确对立

以 JSON 返回：{{"pro_stance": "正方立场", "con_stance": "反方立场"}}"#,
            title = title,
            max = MAX_STANCE_CHARS,
        )
    }

    /// Assign a side to every persona in one request
    pub fn opinions_batched(title: &str, pair: &PositionPair, catalog: &PersonaCatalog) -> String {
        let mut prompt = Self::debate_header(title, pair);

        prompt.push_str("\n请为以下哲学家分别判断立场：\n");
        for persona in catalog.iter() {
            prompt.push_str(&Self::persona_line(persona));
        }

        prompt.push_str(&format!(
            r#"
要求：
- 基于其哲学思想判断支持正方（pro）还是反方（con）
- 用其哲学思想解释理由，不超过{reason}个字
- 确保正反双方至少各有一人

以 JSON 返回：
{{"philosophers": [{{"id": "哲学家id", "stance": "pro 或 con", "reason": "理由"}}]}}
共{count}位哲学家，id 必须与上面列出的一致。"#,
            reason = REASON_HINT_CHARS,
            count = catalog.len(),
        ));

        prompt
    }

    /// Assign a side to a single persona
    pub fn opinion_single(title: &str, pair: &PositionPair, persona: &Persona) -> String {
        let mut prompt = Self::debate_header(title, pair);
        prompt.push_str(&format!(
            r#"
你是{name}（{name_en}），你的思想是：{philosophy}。
请基于你的哲学思想判断支持正方（pro）还是反方（con），并用不超过{reason}个字说明理由。

以 JSON 返回：{{"stance": "pro 或 con", "reason": "理由"}}"#,
            name = persona.name,
            name_en = persona.name_en,
            philosophy = persona.philosophy,
            reason = REASON_HINT_CHARS,
        ));
        prompt
    }

    /// Everything in a single request: title, positions and opinions
    pub fn combined(topic: &str, catalog: &PersonaCatalog) -> String {
        let mut prompt = format!(
            r#"对于辩题"{topic}"，请完成以下任务：

1. 标题凝练：辩题不超过{title_max}个字时直接使用原题；否则凝练成不超过{title_max}个字的标题，保留核心争议点。
2. 立场生成：给出正方立场和反方立场，各不超过{stance_max}个字，双方明确对立。
3. 哲学家观点：为以下哲学家判断支持正方（pro）还是反方（con），并用其思想解释理由（不超过{reason}个字），确保正反双方至少各有一人。
"#,
            topic = topic,
            title_max = MAX_TITLE_CHARS,
            stance_max = MAX_STANCE_CHARS,
            reason = REASON_HINT_CHARS,
        );

        for persona in catalog.iter() {
            prompt.push_str(&Self::persona_line(persona));
        }

        prompt.push_str(
            r#"
以 JSON 返回：
{
  "refined_topic": "标题",
  "pro_stance": "正方立场",
  "con_stance": "反方立场",
  "philosophers": [{"id": "哲学家id", "stance": "pro 或 con", "reason": "理由"}]
}"#,
        );

        prompt
    }

    fn debate_header(title: &str, pair: &PositionPair) -> String {
        format!(
            "辩题：{}\n正方立场：{}\n反方立场：{}\n",
            title,
            pair.pro(),
            pair.con()
        )
    }

    fn persona_line(persona: &Persona) -> String {
        format!(
            "- {}（id: {}）：{}\n",
            persona.name,
            persona.id,
            persona.philosophy
        )
    }
}
