//! Instruction templates for the two document variants.
//!
//! Both templates demand a complete, compilable LaTeX document and nothing
//! else in the response, so the generated text can go straight to the
//! typesetting toolchain.

/// Shared preamble both variants build their document on.
const LATEX_TEMPLATE: &str = r#"\documentclass[12pt,a4paper]{article}

\usepackage[polish]{babel}
\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}

\usepackage{geometry}
\geometry{margin=2.5cm}

\usepackage{setspace}
\onehalfspacing

\usepackage{microtype}

\usepackage{hyperref}
\hypersetup{
    hidelinks,
    pdfauthor={Notatki z wykladu},
    pdfcreator={LaTeX}
}

\usepackage{enumitem}
\setlist{nosep}

\usepackage{csquotes}

\usepackage{titlesec}
\titleformat{\section}{\normalfont\Large\bfseries}{\thesection.}{0.6em}{}
\titleformat{\subsection}{\normalfont\large\bfseries}{\thesubsection.}{0.5em}{}
\titleformat{\subsubsection}{\normalfont\normalsize\bfseries}{\thesubsubsection.}{0.4em}{}

\begin{document}

\title{Notatki z wykladu}
\author{Na podstawie transkrypcji wykladu}
\date{}
\maketitle

\tableofcontents
\newpage

%%% CONTENT STARTS HERE %%%

%%% CONTENT ENDS HERE %%%

\end{document}"#;

const STUDY_NOTES_TASK: &str = r#"You are a language model that converts lecture transcripts into well-formatted LaTeX study notes that can be compiled into a clean, readable PDF.

You will receive a raw transcript of a university lecture. The transcript will be messy: spoken language, repetitions, false starts, small mistakes, and no structure.

Your job:

1. Convert the transcript into a SINGLE LaTeX document that:
   - Can be compiled to PDF without modification.
   - Is clearly structured, pleasant to read, and suitable as a study script to prepare for an exam.
   - Preserves ALL the meaningful information from the lecture (names, dates, terms, distinctions, examples, historical context, definitions).

2. Structure and clarity:
   - Organize the material into a small number of logical sections and subsections.
   - Correct obvious transcription errors, fix grammar and punctuation, and join broken sentences.
   - You may paraphrase for clarity, but do not omit important content. Merge repetitions into one clear explanation, or keep both if they add nuance.
   - You may insert short clarifying phrases or definitions where helpful, but do NOT invent new facts.

3. Use lists (itemize / enumerate) only when they genuinely improve readability. Prefer normal paragraphs; the document should read like well-structured lecture notes, not a bullet-point slide deck.

4. Keep and highlight key academic details: author names, work titles (in the original language, in \emph{...}), historical periods, dates, factions, genre definitions, and the lecture's main theses. Use section titles so topics are easy to locate.

5. LaTeX requirements:
   - Output a complete, compilable LaTeX document, starting with \documentclass and ending with \end{document}.
   - Use the template given below as a base; keep the general preamble, add standard packages only if necessary, and keep hyperref with hidelinks.
   - Use \section, \subsection, \subsubsection where needed, but do not over-segment the text.
   - Keep the transcript's language and its typographic conventions.

6. Output format requirement (IMPORTANT):
   - Your response must contain ONLY the LaTeX source code of the final document.
   - No explanations, no markdown code fences, no placeholders like TODO.
"#;

const SPOKEN_STYLE_TASK: &str = r#"You are a language model that converts lecture transcripts into clean, lightly edited LaTeX spoken-style scripts that can be compiled into a PDF.

Unlike a summary, your goal is to preserve the lecturer's voice and wording as much as possible, but without typical spoken disfluencies: filler syllables, false starts, abandoned sentences, and stumbles.

Your job:

1. Produce a SINGLE LaTeX document that can be compiled directly to PDF and reads like a fluent, live lecture delivery, with the filler noise removed.

2. Keep the wording as close to the original speech as possible:
   - Do not summarize and do not shorten the substance. Keep every piece of information, every name, date, concept, example, and digression that carries meaning.
   - You may join broken sentences into one correct sentence, fix word order so it reads naturally, and collapse self-corrections into the final, corrected version.
   - Do not change the meaning and do not add content or interpretation that is not in the original.

3. Style and structure:
   - Add \section and \subsection headings at clear topic transitions, and paragraph breaks where the speech shifts between blocks of thought.
   - Keep the spoken character: addresses to the audience and forward references to later classes stay in.
   - Remove pure verbal noise: fillers, repeated hesitations, and obvious slips of the tongue (correct them when the intended word is clear from context).

4. Use lists only where the speaker genuinely enumerates items; the text should flow like a lecture, not a bullet-point outline.

5. Keep all factual material: author names, work titles (in \emph{...}), dates, historical events, faction names, genre definitions, and interpretive theses.

6. LaTeX requirements:
   - Output a complete, compilable LaTeX document, starting with \documentclass and ending with \end{document}.
   - Use the template given below as a base; keep the preamble, add standard packages only if truly needed, and keep hyperref with hidelinks.

7. Output format requirement (IMPORTANT):
   - Your response must contain ONLY the LaTeX source code of the final document.
   - No explanations, no markdown code fences, no comments addressed to the user.
"#;

const INPUT_PROTOCOL: &str = r#"
--------------------------------
LATEX TEMPLATE TO USE AND ADAPT
--------------------------------

Use this template. Insert the reworked lecture content in the place marked between the CONTENT markers. You may rename the title and sections as needed.

"#;

const FINAL_REMINDER: &str = r#"

--------------------------------
INPUT FORMAT
--------------------------------

After this instruction you will receive the lecture transcript between the markers:

BEGIN_TRANSCRIPT
...
END_TRANSCRIPT

Respond with ONLY the complete LaTeX code of the final document, without the BEGIN_TRANSCRIPT/END_TRANSCRIPT markers and without markdown fences.
"#;

/// Full instruction template for the study-notes variant.
pub fn study_notes_instructions() -> String {
    [STUDY_NOTES_TASK, INPUT_PROTOCOL, LATEX_TEMPLATE, FINAL_REMINDER].concat()
}

/// Full instruction template for the spoken-style variant.
pub fn spoken_style_instructions() -> String {
    [SPOKEN_STYLE_TASK, INPUT_PROTOCOL, LATEX_TEMPLATE, FINAL_REMINDER].concat()
}

/// Wrap the transcript in the marker protocol the templates announce.
pub fn wrap_transcript(transcript: &str) -> String {
    format!("BEGIN_TRANSCRIPT\n{}\nEND_TRANSCRIPT", transcript)
}
