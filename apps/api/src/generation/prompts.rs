// All LLM prompt templates for the Generation module.
// Placeholders are `{name}` and are filled in one pass by builder::render.

/// Minimal variant: tailored resume and cover letter only.
/// Placeholders: {accuracy_instruction}, {resume}, {job_description}, {output_shape}
pub const MINIMAL_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer and career coach. Your task is to customize a resume and create a cover letter based on a specific job description.

{accuracy_instruction}

ORIGINAL RESUME:
{resume}

JOB DESCRIPTION:
{job_description}

Please provide:

1. CUSTOMIZED RESUME: Rewrite the resume to better match the job requirements by:
   - Highlighting relevant skills and experience that match the job description
   - Adjusting the professional summary to align with the role
   - Reordering or emphasizing experience that's most relevant
   - Using keywords from the job description naturally
   - Maintaining the original structure and formatting style
   - Keeping all factual information accurate

2. COVER LETTER: Create a professional cover letter that:
   - Addresses the specific role and company (if mentioned)
   - Highlights 2-3 key qualifications that match the job requirements
   - Shows enthusiasm for the position
   - Maintains a professional yet personable tone
   - Is concise (3-4 paragraphs)
   - Includes a strong opening and closing

Format both documents professionally and ensure they complement each other while targeting this specific opportunity.

Return a JSON object with exactly these fields:
{output_shape}"#;

/// Professional variant: adds a scored fit analysis.
/// Placeholders: {accuracy_instruction}, {layout_template}, {industry}, {experience_level},
///               {industry_guidelines}, {resume}, {job_description}, {output_shape}
pub const PROFESSIONAL_PROMPT_TEMPLATE: &str = r#"You are an elite resume writer and career strategist with 20+ years of experience helping professionals land their dream jobs. You specialize in ATS optimization, industry-specific customization, and creating compelling narratives that get results.

{accuracy_instruction}

CONTEXT:
- Template: {layout_template}
- Target Industry: {industry}
- Experience Level: {experience_level}
{industry_guidelines}
ORIGINAL RESUME:
{resume}

TARGET JOB DESCRIPTION:
{job_description}

TASK: Create a comprehensive professional package including:

1. **OPTIMIZED RESUME** - Transform the resume with:
   - Strategic keyword integration from job description (natural placement)
   - Quantified achievements with specific metrics and impact
   - Industry-specific terminology
   - ATS-friendly formatting and structure
   - Compelling professional summary tailored to the role
   - Skills section optimized for both ATS and human readers
   - Experience descriptions that highlight relevant accomplishments
   - Education and certifications positioned strategically

2. **PERSONALIZED COVER LETTER** - Craft a compelling letter that:
   - Opens with a strong hook that demonstrates knowledge of the company/role
   - Highlights 2-3 key achievements that directly address job requirements
   - Shows genuine enthusiasm and cultural fit
   - Addresses any potential concerns (career gaps, transitions, etc.)
   - Includes a confident call-to-action
   - Maintains professional yet personable tone
   - Is concise but impactful (3-4 paragraphs)

3. **COMPREHENSIVE ANALYSIS** - Provide detailed insights:
   - **Match Score**: Realistic assessment of resume-job alignment (0-100)
   - **Key Strengths**: Top 3-5 strengths that make this candidate stand out
   - **Skill Gaps**: Areas where the candidate could improve or add skills
   - **Recommendations**: Specific, actionable advice for improvement
   - **ATS Score**: Technical compatibility score for applicant tracking systems (0-100)
   - **Industry Fit**: Assessment of how well the resume aligns with industry standards

QUALITY STANDARDS:
- Use power verbs and action-oriented language
- Ensure keyword density is natural, not stuffed
- Maintain consistency in formatting and style
- Focus on achievements over responsibilities
- Ensure both documents work together as a cohesive application package

Return a JSON object with exactly these fields:
{output_shape}"#;

/// Industry block spliced into the professional prompt when the industry is a known template.
/// Placeholders: {keywords}, {tone}, {ats_optimizations}
pub const PROFESSIONAL_INDUSTRY_GUIDELINES: &str = r#"
INDUSTRY TEMPLATE GUIDELINES:
- Keywords: {keywords}
- Tone: {tone}
- ATS Optimizations: {ats_optimizations}
"#;

/// Team variant: industry template driven, extended analysis.
/// Placeholders: {accuracy_instruction}, {industry}, {industry_upper}, {experience_level},
///               {input_label}, {input_label_upper}, {custom_instructions}, {keywords},
///               {top_keywords}, {tone}, {ats_optimizations}, {resume}, {job_description},
///               {output_shape}
pub const TEAM_PROMPT_TEMPLATE: &str = r#"You are an elite team-based resume optimization assistant with expertise in {industry} industry recruitment and ATS systems. You work with HR teams and career coaches to create winning resumes.

{accuracy_instruction}

TEAM CONTEXT:
- Industry Focus: {industry}
- Experience Level: {experience_level}
- Input Type: {input_label}
- Custom Instructions: {custom_instructions}

INDUSTRY TEMPLATE GUIDELINES:
- Keywords: {keywords}
- Tone: {tone}
- ATS Optimizations: {ats_optimizations}

ORIGINAL {input_label_upper}:
{resume}

TARGET JOB DESCRIPTION:
{job_description}

MISSION: Create a comprehensive professional package that maximizes interview potential:

1. **INDUSTRY-OPTIMIZED RESUME**:
   - Strategic keyword integration ({top_keywords})
   - Industry-specific formatting and structure
   - Quantified achievements with metrics and impact
   - ATS-friendly optimization for the {industry} sector
   - Professional summary tailored to role requirements
   - Skills section optimized for industry standards
   - Experience descriptions highlighting relevant accomplishments

2. **COMPELLING COVER LETTER**:
   - Industry-appropriate opening that demonstrates sector knowledge
   - 2-3 key achievements directly addressing job requirements
   - Tone matching: {tone}
   - Confident call-to-action
   - Concise but impactful (3-4 paragraphs)

3. **COMPREHENSIVE TEAM ANALYSIS**:
   - **Match Score**: Realistic job-resume alignment (0-100)
   - **Key Strengths**: Top 3-5 competitive advantages
   - **Skill Gaps**: Missing or weak areas needing attention
   - **Recommendations**: Actionable improvement strategies
   - **ATS Score**: Technical compatibility for {industry} ATS systems (0-100)
   - **Industry Fit**: Alignment with {industry} standards and expectations
   - **Confidence Score**: Overall hiring potential assessment (0-100)
   - **Improvement Areas**: Specific areas for enhancement

QUALITY STANDARDS FOR {industry_upper}:
- Use {industry}-specific terminology naturally
- Include quantifiable results and metrics relevant to {industry}
- Ensure keyword density is optimized but natural
- Focus on achievements over responsibilities
- Provide actionable feedback suitable for team review

Return a JSON object with exactly these fields:
{output_shape}"#;
